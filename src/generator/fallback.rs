//! Deterministic fallback itineraries
//!
//! Hard-coded 7-step sequences per category, used whenever the remote model
//! is unreachable or returns something unusable. No network, no randomness:
//! the same category always yields the same steps, so goal creation can
//! never be blocked by the provider.

use tracing::info;

use crate::domain::Category;

use super::{Itinerary, ItinerarySource, post_process};

/// One hard-coded step
pub(crate) struct FallbackStep {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
}

const fn step(title: &'static str, description: &'static str, duration: &'static str) -> FallbackStep {
    FallbackStep {
        title,
        description,
        duration,
    }
}

const TRAVEL_STEPS: [FallbackStep; 7] = [
    step(
        "Pin down your dates",
        "Pick a realistic travel window and block it off on your calendar.",
        "10 min",
    ),
    step(
        "Set a trip budget",
        "Write down a total number you're comfortable spending, then split it across transport, lodging, and fun.",
        "20 min",
    ),
    step(
        "Research your destination",
        "Read one solid travel guide or blog about where you're going and save three places you don't want to miss.",
        "30 min",
    ),
    step(
        "Check your documents",
        "Make sure your passport or ID is valid for the dates, and note any visa or entry requirements.",
        "15 min",
    ),
    step(
        "Price out transport",
        "Compare flight, train, or driving options for your dates and save the two best candidates.",
        "25 min",
    ),
    step(
        "Book your stay",
        "Pick lodging that fits the budget from step two and reserve it - refundable if you're unsure.",
        "30 min",
    ),
    step(
        "Make your packing list",
        "List everything you'll need for the climate and activities, and flag anything you still have to buy.",
        "15 min",
    ),
];

const CAREER_STEPS: [FallbackStep; 7] = [
    step(
        "Write the headline",
        "Describe the role or milestone you're aiming for in one sentence, as if announcing it.",
        "10 min",
    ),
    step(
        "Audit your skills",
        "List the skills the target requires, mark each one you already have, and circle the gaps.",
        "25 min",
    ),
    step(
        "Update your materials",
        "Refresh your resume or portfolio so it reflects your best recent work.",
        "45 min",
    ),
    step(
        "Pick one gap to close",
        "Choose the single most important skill gap and find a course, book, or project that addresses it.",
        "20 min",
    ),
    step(
        "Tell one person",
        "Share your goal with a colleague, mentor, or friend who can hold you to it.",
        "15 min",
    ),
    step(
        "Have the conversation",
        "Set up a chat with someone already doing what you want to do and ask how they got there.",
        "30 min",
    ),
    step(
        "Take one visible step",
        "Apply, pitch, publish, or volunteer - do one thing that puts your goal on the record.",
        "30 min",
    ),
];

const FINANCE_STEPS: [FallbackStep; 7] = [
    step(
        "Name the number",
        "Write down exactly what you're saving for and what it costs.",
        "10 min",
    ),
    step(
        "Find your baseline",
        "Check your accounts and note what you actually spent last month, without judgment.",
        "20 min",
    ),
    step(
        "Spot three leaks",
        "Find three recurring expenses you wouldn't miss and cancel or shrink them.",
        "25 min",
    ),
    step(
        "Set the monthly slice",
        "Divide your goal by your timeline to get a monthly amount, and check it against your baseline.",
        "15 min",
    ),
    step(
        "Open the bucket",
        "Set up a separate savings space just for this goal so the money has somewhere to live.",
        "20 min",
    ),
    step(
        "Automate the transfer",
        "Schedule an automatic transfer of your monthly slice for the day after payday.",
        "10 min",
    ),
    step(
        "Do the first review",
        "After the first transfer lands, check the balance and adjust the slice if it pinched too hard.",
        "15 min",
    ),
];

const GROWTH_STEPS: [FallbackStep; 7] = [
    step(
        "Define done",
        "Write one sentence describing what success looks like for this goal.",
        "10 min",
    ),
    step(
        "Shrink the first step",
        "Pick a version of the habit so small you could do it on your worst day.",
        "10 min",
    ),
    step(
        "Anchor it",
        "Attach the small step to something you already do daily, like morning coffee.",
        "5 min",
    ),
    step(
        "Do it once",
        "Do the tiny version today. That's the whole task.",
        "15 min",
    ),
    step(
        "Clear one obstacle",
        "Notice what almost stopped you yesterday and remove it in advance.",
        "15 min",
    ),
    step(
        "Do it three days straight",
        "Repeat the tiny version three days in a row and mark each one.",
        "15 min",
    ),
    step(
        "Grow it slightly",
        "Make the step ten percent bigger - one more page, one more minute - and keep going.",
        "20 min",
    ),
];

const RELATIONSHIP_STEPS: [FallbackStep; 7] = [
    step(
        "Write why it matters",
        "Put into words what this relationship means to you and what you want more of.",
        "15 min",
    ),
    step(
        "Reach out today",
        "Send a message that's just checking in, with no agenda attached.",
        "5 min",
    ),
    step(
        "Put time on the calendar",
        "Propose a specific time to talk or meet, and make it easy to say yes to.",
        "10 min",
    ),
    step(
        "Really listen",
        "During your next conversation, ask one open question and let them finish every answer.",
        "30 min",
    ),
    step(
        "Say the appreciation out loud",
        "Tell them one specific thing you appreciate about them, recently observed.",
        "5 min",
    ),
    step(
        "Do something small for them",
        "Handle one small thing they'd normally have to do themselves.",
        "20 min",
    ),
    step(
        "Make it a rhythm",
        "Agree on a recurring touchpoint - a weekly call, a monthly dinner - and schedule the first one.",
        "15 min",
    ),
];

const TRAVEL_PASS: &str = "Boarding pass issued - your adventure is officially in motion.";
const CAREER_PASS: &str = "You've already done the hardest part: deciding to go for it.";
const FINANCE_PASS: &str = "Every transfer is a brick. You're building something that lasts.";
const GROWTH_PASS: &str = "Small steps, every day. That's how everything big gets built.";
const RELATIONSHIP_PASS: &str = "Showing up is the whole secret, and you just did.";

pub(crate) fn steps_for(category: Category) -> &'static [FallbackStep; 7] {
    match category {
        Category::Travel => &TRAVEL_STEPS,
        Category::Career => &CAREER_STEPS,
        Category::Finance => &FINANCE_STEPS,
        Category::Growth => &GROWTH_STEPS,
        Category::Relationship => &RELATIONSHIP_STEPS,
    }
}

pub(crate) fn encouragement_for(category: Category) -> &'static str {
    match category {
        Category::Travel => TRAVEL_PASS,
        Category::Career => CAREER_PASS,
        Category::Finance => FINANCE_PASS,
        Category::Growth => GROWTH_PASS,
        Category::Relationship => RELATIONSHIP_PASS,
    }
}

/// Synthesize the deterministic itinerary for a category.
///
/// Always succeeds, always returns exactly 7 challenges with only the first
/// unlocked. Public so a caller that cancelled a remote generation can still
/// produce challenges before saving a goal.
pub fn fallback_itinerary(category: Category) -> Itinerary {
    info!(%category, "Synthesizing fallback itinerary");
    let steps = steps_for(category)
        .iter()
        .map(|s| (s.title.to_string(), s.description.to_string(), s.duration.to_string()))
        .collect();
    post_process(steps, encouragement_for(category).to_string(), ItinerarySource::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_total_for_every_category() {
        for category in Category::ALL {
            let itinerary = fallback_itinerary(category);
            assert_eq!(itinerary.challenges.len(), 7, "{} must have 7 steps", category);
            assert!(!itinerary.boarding_pass.is_empty(), "{} missing encouragement", category);
            assert_eq!(itinerary.source, ItinerarySource::Fallback);

            assert!(itinerary.challenges[0].unlocked);
            assert!(itinerary.challenges[1..].iter().all(|c| !c.unlocked));
            assert!(itinerary.challenges.iter().all(|c| !c.completed));
        }
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_itinerary(Category::Finance);
        let b = fallback_itinerary(Category::Finance);
        assert_eq!(a.challenges, b.challenges);
        assert_eq!(a.boarding_pass, b.boarding_pass);
    }

    #[test]
    fn test_fallback_steps_have_content() {
        for category in Category::ALL {
            for s in steps_for(category) {
                assert!(!s.title.is_empty());
                assert!(!s.description.is_empty());
                assert!(s.duration.contains("min") || s.duration.contains("hour"));
            }
        }
    }

    #[test]
    fn test_fallback_ids_sequential() {
        let itinerary = fallback_itinerary(Category::Travel);
        for (i, challenge) in itinerary.challenges.iter().enumerate() {
            assert_eq!(challenge.id, format!("challenge_{}", i + 1));
        }
    }
}
