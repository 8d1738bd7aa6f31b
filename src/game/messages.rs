// End-of-game messages, highest threshold first. First match wins.
pub const END_MESSAGES: &[(u32, &str)] = &[
    (20, "Okay overachiever 👑 You collected ALL the love."),
    (12, "You're definitely loved, no doubts about it 🫶"),
    (5, "You got some hearts! But don't worry, you have mine by default 💗"),
];

pub const CONSOLATION_MESSAGE: &str =
    "Terrible at catching hearts, amazing at catching my vibes though 😌";

pub fn end_message(score: u32) -> &'static str {
    END_MESSAGES
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, msg)| *msg)
        .unwrap_or(CONSOLATION_MESSAGE)
}
