#![allow(dead_code)]

use sms_spam::{datasets::sms_spam::Item, pipelines::text_classification::Label};

/// The seed rows every scenario starts from
pub const SEED: &[(&str, &str)] = &[
    ("spam", "WIN A FREE PRIZE NOW"),
    ("ham", "let's meet at 5pm"),
    ("spam", "CLAIM YOUR CASH REWARD"),
    ("ham", "see you at the office"),
];

/// Supporting rows so the fit is not degenerate
pub const SUPPORT: &[(&str, &str)] = &[
    ("spam", "Free cash prize waiting for you, click the link"),
    ("spam", "Click here to claim your free prize today"),
    ("spam", "You have won cash! Click to collect your reward"),
    ("spam", "Congratulations, free entry to win a cash prize"),
    ("spam", "URGENT: claim your prize, click now"),
    ("spam", "Free ringtones, click to subscribe"),
    ("spam", "Win cash and prizes, reply WIN to enter"),
    ("spam", "Exclusive offer: free cash bonus, click today"),
    ("spam", "Your number won a prize, claim your cash"),
    ("spam", "Text WIN to claim a free holiday prize"),
    ("ham", "are we still having lunch tomorrow"),
    ("ham", "want to grab lunch later"),
    ("ham", "lunch at the usual place?"),
    ("ham", "I'll be home for dinner"),
    ("ham", "running late, save me some lunch"),
    ("ham", "how was your day"),
    ("ham", "can you pick up milk on the way"),
    ("ham", "thanks for the lunch today"),
    ("ham", "meeting moved to 3pm"),
    ("ham", "lunch was great, let's do it again"),
    ("ham", "ring me when you get home"),
    ("ham", "happy birthday! see you tonight"),
    ("ham", "are you coming to lunch with the team"),
    ("ham", "I'm at the station, see you soon"),
    ("ham", "lunch meeting with Sarah on Friday"),
    ("ham", "sorry, stuck in traffic"),
];

/// Every row as dataset items
pub fn corpus() -> Vec<Item> {
    SEED.iter()
        .chain(SUPPORT)
        .map(|(label, message)| {
            Item::new(label.parse::<Label>().unwrap(), message.to_string())
        })
        .collect()
}

/// Every row as CSV with a `label,message` header
pub fn corpus_csv() -> String {
    let mut csv = String::from("label,message\n");

    for (label, message) in SEED.iter().chain(SUPPORT) {
        csv.push_str(&format!("{},\"{}\"\n", label, message));
    }

    csv
}
