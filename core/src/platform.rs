pub const DRAG_PROMPT: &str = "Drag words here to begin your poem...";
pub const TAP_PROMPT: &str = "Tap words to add them to your poem...";

/// Capabilities fixed at start-up. Everything that behaves differently on
/// touch screens reads this instead of probing the environment again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Platform {
    pub is_touch: bool,
}

impl Platform {
    pub const POINTER: Platform = Platform { is_touch: false };
    pub const TOUCH: Platform = Platform { is_touch: true };

    pub fn prompt_text(self) -> &'static str {
        if self.is_touch {
            TAP_PROMPT
        } else {
            DRAG_PROMPT
        }
    }
}
