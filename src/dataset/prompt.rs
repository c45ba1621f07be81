/// Prompt text for the coordinate-locating task.
use crate::annotation::types::Element;
use crate::llm::types::ChatMessage;

pub const REFERENCE_HEADER: &str = "Reference examples:\n";
pub const REFERENCE_TRAILER: &str = "\nNow locate this element:\n";

pub const LOCATOR_SYSTEM_PROMPT: &str = "You are a coordinate-locator-bot.

You are given a screenshot from a computer screen and descriptions of UI elements.
First you will see some reference examples with their coordinates for scale.
Then you will see the target element to locate.
Your task is to output the pixel coordinates of the target element.

Motivate your reasoning in one sentence and then output the coordinates inside angle brackets at the end. Like this:
<100,200>
";

pub fn system_message() -> ChatMessage {
    ChatMessage::system(LOCATOR_SYSTEM_PROMPT)
}

/// Few-shot block listing each reference element and the centre of its box.
pub fn reference_text(references: &[Element]) -> String {
    let mut text = String::from(REFERENCE_HEADER);
    for elem in references {
        let (cx, cy) = elem.bounding_box.center();
        text.push_str(&format!(
            "- Element '{}' is at x={}, y={}\n",
            elem.description.trim(),
            cx,
            cy
        ));
    }
    text.push_str(REFERENCE_TRAILER);
    text
}

pub fn target_prompt(reference_text: &str, description: &str) -> String {
    format!("{reference_text}{description}")
}
