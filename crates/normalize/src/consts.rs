use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Release and quality markers that carry no information about which title a
/// file belongs to. Bracketed groups are matched lazily so that
/// `[Group] Title [720p]` keeps the title in between.
const NOISE: &str = concat!(
    r"Specials|OVA|DVD|BD|Complete",
    r"|v[0-9]+",
    r"|(E[pP])*[0-9]+[ ]*[-~][ ]*[0-9]+",
    r"|[bB]atch",
    r"|((720)|(1080))([pP]*)",
    r"|\(.*?\)|\[.*?\]",
);

regex!(EXTENSION_REGEX, r"(?i)\.(mkv|mp4)$");
regex!(EPISODE_NUMBER_REGEX, r"[ ][0-9]{2,}");
regex!(NOISE_REGEX, NOISE);
regex!(TIDY_REGEX, r"[ ]+|-|~|:|\?|'|\.|_");
regex!(TIDY_TITLE_REGEX, r"[ ]+|-|~|:|\?|'|\.|_|`");
