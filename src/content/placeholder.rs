//! User-facing texts substituted when content generation gives up.

use crate::Error;

pub const TIMEOUT: &str = "喵嗚～小雲的秘密電波今天好像塞車了，晨報送不出來...下次再試試看！🚗💨";
pub const UPSTREAM_ERROR: &str = "喵嗚～小雲的秘密電波好像被外星貓干擾了！晨報咻～一聲不見了！🛸👽";
pub const NETWORK_ERROR: &str = "喵嗚～小雲的秘密電波好像秀逗了，晨報飛走了～💨";
pub const MALFORMED: &str = "喵嗚...小雲的晨報內容今天好像變成一團亂碼了...對不起喔...";
pub const INCOMPLETE: &str = "喵...小雲今天的晨報格式有點怪怪的...內容不完整耶...🥺";
pub const EMPTY: &str = "咪...小雲今天好像詞窮了，晨報內容空空的耶...（歪頭）";
pub const UNKNOWN: &str = "咪！小雲的腦袋今天變成一團毛線球了！晨報也跟著打結了！🧶😵";

/// Placeholder for the failure that ended the last attempt.
pub fn for_error(err: &Error) -> String {
    match err {
        Error::Timeout(_) => TIMEOUT.to_string(),
        Error::ContentBlocked(reason) => {
            format!("咪...小雲今天的晨報被一股神秘的力量 ({}) 緊緊地藏起來了！不給看！", reason)
        }
        Error::AiProvider(_) => UPSTREAM_ERROR.to_string(),
        Error::Http(_) => NETWORK_ERROR.to_string(),
        Error::MalformedContent(_) | Error::Serialization(_) => MALFORMED.to_string(),
        Error::IncompleteContent(_) => INCOMPLETE.to_string(),
        Error::EmptyContent => EMPTY.to_string(),
        _ => UNKNOWN.to_string(),
    }
}
