pub mod gemini;

use crate::error::{AssetError, Result};

pub trait TextBackend {
    fn name(&self) -> &str;
    fn generate(&self, prompt: &str) -> Result<String>;
}

pub fn sentence_prompt(word: &str) -> String {
    format!(
        "Create a simple, kid-friendly French sentence using the word \"{word}\".\n\
         \n\
         Requirements:\n\
         - The sentence should be appropriate for a 7-year-old child\n\
         - Use simple vocabulary and grammar\n\
         - The sentence should be fun or interesting for a child\n\
         - Keep it short (5-10 words maximum)\n\
         - The word \"{word}\" must appear in the sentence exactly as written\n\
         \n\
         Return ONLY the French sentence, nothing else."
    )
}

/// Used when the text service cannot produce a sentence.
pub fn fallback_sentence(word: &str) -> String {
    format!("Le mot est {word}.")
}

pub fn generate_sentence(backend: &dyn TextBackend, word: &str) -> Result<String> {
    let raw = backend.generate(&sentence_prompt(word))?;
    let sentence = clean_sentence(&raw);
    if sentence.is_empty() {
        return Err(AssetError::Generation(format!(
            "{} returned an empty sentence",
            backend.name()
        )));
    }
    Ok(sentence)
}

/// Trims whitespace and one layer of surrounding quotes.
pub fn clean_sentence(raw: &str) -> String {
    let mut sentence = raw.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('«', '»'), ('“', '”')] {
        if let Some(inner) = sentence
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            sentence = inner.trim();
        }
    }
    sentence.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    impl TextBackend for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn strips_quotes() {
        assert_eq!(clean_sentence("  \"Le chat dort.\"\n"), "Le chat dort.");
        assert_eq!(clean_sentence("'Le chat dort.'"), "Le chat dort.");
        assert_eq!(clean_sentence("« Le chat dort. »"), "Le chat dort.");
        assert_eq!(clean_sentence("Le \"chat\" dort."), "Le \"chat\" dort.");
    }

    #[test]
    fn prompt_names_the_word() {
        assert!(sentence_prompt("hibou").contains("\"hibou\" must appear"));
    }

    #[test]
    fn blank_reply_is_a_failure() {
        let err = generate_sentence(&Canned(" \"\" "), "hibou").unwrap_err();
        assert!(matches!(err, AssetError::Generation(_)));
        assert_eq!(
            generate_sentence(&Canned("Le hibou chante."), "hibou").unwrap(),
            "Le hibou chante."
        );
    }
}
