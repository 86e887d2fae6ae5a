//! Personas and prompt templates.
//!
//! Three generation personas are distinguished only by their system
//! instruction: transcription, visual analysis, and general content
//! generation (summary, roadmap, classification, chat).

/// Generation persona, selecting a system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// Video-to-text transcription and translation
    Transcription,
    /// Visual/content analysis of the video itself
    Vision,
    /// Text generation over transcripts and analyses
    Content,
}

impl Persona {
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Persona::Transcription => {
                "You are the transcription model, who can convert the given video \
                 into text format, and also able to translate the transcript"
            }
            Persona::Vision => {
                "You are a very good video analyzer and information extractor from video"
            }
            Persona::Content => {
                "You are the content generator, who can deliver the required \
                 information based on the transcript given"
            }
        }
    }
}

/// Prompt for transcription + translation with a strict JSON contract.
pub const TRANSCRIBE_PROMPT: &str = "Transcribe this video content. If the video content or \
transcript is in another language, translate it to English, else don't need to translate. \
Return STRICT JSON format with:
{\"Original_text\": string,
 \"Translated_text\": string,
 \"Original_language\": string}";

/// Prompt for visual/content analysis with a strict JSON contract.
pub const ANALYZE_PROMPT: &str = "Analyze this video content for any purposes, related to \
the video (It can be educational, entertainment, etc). Return STRICT JSON format with:
{\"genre\": string,
 \"mood\": string,
 \"similar_content_suggestions\": array of strings,
 \"key_elements\": array of strings,
 \"audience_options\": array of strings}";

/// Build the educational-content classification prompt for a transcript.
pub fn classify_prompt(transcript: &str) -> String {
    format!(
        "By the help of the following text, identify the score of whether it is related \
         educational content or not, the score provided should be in the range of 0 to 1, \
         where higher represents educational content.
DO NOT encourage any vulgar or unwanted content required for entertainment purposes like \
comedy, singing, dancing and all.
Always try to look straight on the point, and the tone of the text too; if it is \
professional and is a knowledge related thing, consider it to be educational.
The output format should be a STRICT JSON FORMAT as provided:

{{\"Score\": float value between 0 and 1}}

This is the following text: {transcript}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prompt_embeds_transcript() {
        let prompt = classify_prompt("how compilers work");
        assert!(prompt.contains("how compilers work"));
        assert!(prompt.contains("\"Score\""));
    }
}
