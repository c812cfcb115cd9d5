pub mod imagen;

use crate::error::{AssetError, Result};
use crate::persist::write_atomic;
use crate::throttle::Throttle;
use std::path::Path;

pub trait ImageBackend {
    fn name(&self) -> &str;
    /// `Ok(None)` means the service answered but produced no image, usually
    /// because a safety filter dropped it.
    fn generate(&self, prompt: &str) -> Result<Option<Vec<u8>>>;
}

pub fn illustration_prompt(sentence: &str, word: &str) -> String {
    format!(
        "Create a colorful, child-friendly illustration for a French learning app.\n\
         \n\
         The image should represent this French sentence: \"{sentence}\"\n\
         The key word is: \"{word}\"\n\
         \n\
         Style requirements:\n\
         - Bright, cheerful colors\n\
         - Simple, cartoon-like illustration style suitable for children aged 7\n\
         - No text in the image\n\
         - Safe and appropriate for young children\n\
         - Clear and easy to understand visual"
    )
}

pub fn simple_prompt(word: &str) -> String {
    format!(
        "A simple, cheerful cartoon drawing of \"{word}\" for young children. \
         Bright colors, plain background, no text."
    )
}

/// Tries the sentence prompt, then the word-only prompt. Every attempt waits
/// on `throttle` first.
pub fn generate_with_fallback(
    backend: &dyn ImageBackend,
    throttle: &mut Throttle,
    sentence: &str,
    word: &str,
    path: &Path,
) -> Result<()> {
    let attempts = [
        ("sentence", illustration_prompt(sentence, word)),
        ("word", simple_prompt(word)),
    ];

    for (attempt, prompt) in attempts {
        throttle.acquire();
        match backend.generate(&prompt) {
            Ok(Some(bytes)) if !bytes.is_empty() => {
                write_atomic(path, &bytes)?;
                tracing::debug!(word, attempt, path = %path.display(), "image written");
                return Ok(());
            }
            Ok(_) => tracing::warn!(word, attempt, "image service returned no images"),
            Err(err) => tracing::warn!(word, attempt, error = %err, "image generation failed"),
        }
    }

    Err(AssetError::Generation(format!(
        "{} produced no image for {word}",
        backend.name()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Scripted {
        replies: RefCell<Vec<Result<Option<Vec<u8>>>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<Option<Vec<u8>>>>) -> Self {
            Self {
                replies: RefCell::new(replies),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageBackend for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(&self, prompt: &str) -> Result<Option<Vec<u8>>> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.replies.borrow_mut().remove(0)
        }
    }

    #[test]
    fn falls_back_to_word_prompt_after_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images").join("lune.png");
        let backend = Scripted::new(vec![
            Err(AssetError::Generation("HTTP 500".to_string())),
            Ok(Some(b"\x89PNG\r\n\x1a\nrest".to_vec())),
        ]);

        generate_with_fallback(
            &backend,
            &mut Throttle::disabled(),
            "La lune brille.",
            "lune",
            &path,
        )
        .unwrap();

        let prompts = backend.prompts.borrow();
        assert!(prompts[0].contains("La lune brille."));
        assert_eq!(prompts[1], simple_prompt("lune"));
        assert!(path.exists());
    }

    #[test]
    fn two_empty_replies_fail_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lune.png");
        let backend = Scripted::new(vec![Ok(None), Ok(Some(Vec::new()))]);

        let err = generate_with_fallback(
            &backend,
            &mut Throttle::disabled(),
            "La lune brille.",
            "lune",
            &path,
        )
        .unwrap_err();

        assert!(matches!(err, AssetError::Generation(_)));
        assert_eq!(backend.prompts.borrow().len(), 2);
        assert!(!path.exists());
    }
}
