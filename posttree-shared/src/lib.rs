pub mod model;
pub mod time;

pub mod valid {
    pub mod post {
        use tracing::trace;

        /// Only an exactly empty comment is refused, whitespace goes through as typed.
        pub fn process_comment<S: Into<String>>(comment: S) -> Result<String, String> {
            let comment: String = comment.into();
            if comment.is_empty() {
                trace!("refusing empty comment");
                return Err("comment must not be empty".to_string());
            }

            Ok(comment)
        }

        #[cfg(test)]
        mod post_tests {
            use super::process_comment;
            use test_log::test;

            #[test]
            fn test_process_comment() {
                assert!(process_comment("").is_err());
                assert!(process_comment(" ").is_ok());
                assert!(process_comment("\n").is_ok());
                assert_eq!(process_comment("hello"), Ok("hello".to_string()));
            }
        }
    }
}
