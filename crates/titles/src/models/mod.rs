mod creator;
mod record;
mod tag;
mod variant;

pub use self::creator::Creator;
pub use self::record::TitleRecord;
pub use self::tag::Tag;
pub use self::variant::{TitleEntry, TitleVariant};
