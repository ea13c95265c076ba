use std::sync::OnceLock;

use regex::{Captures, Regex};

/// How a literal `\\` pair is typeset.
pub const BACKSLASH: &str = "$\\backslash$";

fn special_chars() -> &'static Regex {
    static SPECIAL: OnceLock<Regex> = OnceLock::new();
    // A `\\` pair is matched as one token so its backslashes are never
    // escaped individually.
    SPECIAL.get_or_init(|| Regex::new(r"\\\\|[#%&~$_^{}]").expect("Invalid escape regex"))
}

/// Escapes `s` for use in LaTeX running text.
///
/// Each of `# % & ~ $ _ ^ { }` is prefixed with a backslash and every literal
/// `\\` pair becomes [`BACKSLASH`]. A lone backslash is left as is. The scan
/// is a single pass, so neither the inserted backslashes nor the backslash
/// glyph are escaped again.
pub fn escape_tex(s: &str) -> String {
    special_chars()
        .replace_all(s, |caps: &Captures| {
            let token = &caps[0];
            if token == "\\\\" {
                BACKSLASH.to_string()
            } else {
                format!("\\{token}")
            }
        })
        .into_owned()
}

fn tt_span() -> &'static Regex {
    static TT: OnceLock<Regex> = OnceLock::new();
    TT.get_or_init(|| Regex::new(r"`([^`']*)'").expect("Invalid typewriter regex"))
}

fn quoted_span() -> &'static Regex {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    QUOTED.get_or_init(|| Regex::new(r#""([^"]*)""#).expect("Invalid quote regex"))
}

/// Turns `` `x' `` into a typewriter span and `"x"` into typographic quotes.
///
/// Applied to text that has already been escaped.
pub fn prettify_comment(escaped: &str) -> String {
    let tt = tt_span().replace_all(escaped, r"{\tt $1}");
    quoted_span().replace_all(&tt, "``$1''").into_owned()
}
