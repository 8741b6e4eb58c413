/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/


use thiserror::Error;

/// Raised when the input cannot be read as a roll. Carries the input from
/// the failing position onwards, whitespace included.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("Syntax error at '{remainder}'")]
pub struct SyntaxError {
    pub remainder: String,
}

impl SyntaxError {
    pub fn at<S: Into<String>>(remainder: S) -> SyntaxError {
        SyntaxError {
            remainder: remainder.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        assert_eq!(SyntaxError::at("2x6").to_string(), "Syntax error at '2x6'");
        assert_eq!(SyntaxError::at(" +x").to_string(), "Syntax error at ' +x'");
    }
}
