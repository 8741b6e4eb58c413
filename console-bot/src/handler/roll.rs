use bot_utils::{RollResult, SyntaxError};

pub(crate) fn roll(result: &Result<RollResult, SyntaxError>) -> String {
    match result {
        Ok(r) => r.to_string(),
        Err(e) => {
            log::debug!("rejected roll: {}", e);
            e.to_string()
        }
    }
}
