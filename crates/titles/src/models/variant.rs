/// Title type that marks the display name of an entry.
pub const MAIN_TITLE: &str = "main";

/// One title of an anime as listed in the title dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleVariant {
    pub text: String,
    /// Language code, e.g. `x-jat`, `en`, `ja`
    pub language: String,
    /// Title type: `main`, `official`, `syn`, `short`, ...
    pub kind: String,
}
impl TitleVariant {
    pub fn new(text: impl Into<String>, language: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            kind: kind.into(),
        }
    }

    pub fn is_main(&self) -> bool {
        self.kind == MAIN_TITLE
    }
}

/// An anime from the title dump: its ID and every title it is known by.
///
/// Consumed by [`TitleIndex::build`](crate::TitleIndex::build); the variants
/// are not kept once the index exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    pub id: String,
    pub variants: Vec<TitleVariant>,
}
impl TitleEntry {
    pub fn new(id: impl Into<String>, variants: Vec<TitleVariant>) -> Self {
        Self { id: id.into(), variants }
    }
}
