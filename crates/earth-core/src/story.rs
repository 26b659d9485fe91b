//! Narrative chapters shown alongside the interaction graph.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

/// The five built-in chapters, in reading order.
pub fn default_stories() -> Vec<Story> {
    let chapters = [
        (
            "Chapter 1: The Delicate Balance",
            "Earth's systems have evolved over billions of years to create a delicate balance that supports life. The atmosphere, oceans, land, and living organisms all work together in complex ways. When we change one part of this system, like adding greenhouse gases to the atmosphere, it creates ripple effects throughout all other systems.",
            "earth_balance.jpg",
        ),
        (
            "Chapter 2: The Warming World",
            "As greenhouse gases trap more heat in our atmosphere, global temperatures rise. This warming doesn't happen uniformly - polar regions warm faster, disrupting weather patterns worldwide. The jet stream weakens, causing extreme weather events to become more frequent and severe. What starts as a change in atmospheric chemistry becomes floods, droughts, and storms that affect millions.",
            "warming_world.jpg",
        ),
        (
            "Chapter 3: Water in Crisis",
            "Rising temperatures accelerate the water cycle. More water evaporates from warming oceans, leading to intense rainfall in some regions while others face severe droughts. Glaciers and ice sheets melt, raising sea levels and threatening coastal communities. Freshwater becomes scarce where it's needed most, affecting agriculture and triggering conflicts over water resources.",
            "water_crisis.jpg",
        ),
        (
            "Chapter 4: Life Under Pressure",
            "Ecosystems that took millennia to develop are changing in decades. Species must adapt, migrate, or face extinction. Coral reefs bleach in warming oceans, forests shift toward the poles, and the timing of natural events like flowering and migration falls out of sync. Each species lost weakens the web of life that provides us with food, clean air, and water.",
            "biodiversity_loss.jpg",
        ),
        (
            "Chapter 5: The Path Forward",
            "Understanding these connections empowers us to act. By seeing Earth as one interconnected system, we can make better decisions. Protecting forests helps regulate climate and preserve biodiversity. Transitioning to renewable energy reduces atmospheric pollution and slows warming. Every action we take ripples through the Earth system, and together, our actions can create positive change.",
            "future_hope.jpg",
        ),
    ];
    chapters
        .iter()
        .map(|(title, content, image)| Story {
            title: title.to_string(),
            content: content.to_string(),
            background_image: Some(image.to_string()),
        })
        .collect()
}

/// Cursor over a list of chapters. Moves clamp at both ends.
#[derive(Clone, Debug)]
pub struct StoryNavigator {
    stories: Vec<Story>,
    index: usize,
}

impl StoryNavigator {
    pub fn new(stories: Vec<Story>) -> Self {
        StoryNavigator { stories, index: 0 }
    }

    pub fn current(&self) -> Option<&Story> {
        self.stories.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Move forward one chapter. Returns false when already on the last one.
    pub fn next_chapter(&mut self) -> bool {
        if self.index + 1 < self.stories.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move back one chapter. Returns false when already on the first one.
    pub fn previous_chapter(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for StoryNavigator {
    fn default() -> Self {
        StoryNavigator::new(default_stories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut nav = StoryNavigator::default();
        assert_eq!(nav.len(), 5);
        assert!(!nav.previous_chapter());
        assert_eq!(nav.index(), 0);
        for _ in 0..4 {
            assert!(nav.next_chapter());
        }
        assert!(!nav.next_chapter());
        assert_eq!(nav.current().unwrap().title, "Chapter 5: The Path Forward");
        assert!(nav.previous_chapter());
        assert_eq!(nav.index(), 3);
    }

    #[test]
    fn empty_navigator_never_moves() {
        let mut nav = StoryNavigator::new(vec![]);
        assert!(nav.current().is_none());
        assert!(!nav.next_chapter());
        assert!(!nav.previous_chapter());
    }
}
