//! Storyteller - writes the event text attached to each node.
//!
//! The text is a deterministic stand-in for an external content generator:
//! 1. **Draw**: pick a theme, a location, and a character uniformly
//! 2. **Flip**: a coin decides whether the event gets a twist
//! 3. **Twist**: if so, pick one of the fixed twist sentences uniformly
//! 4. **Compose**: two template sentences plus the optional twist

mod stream;

pub use stream::*;

use narrative_rules::{node_sentence, scene_sentence, StoryPalette, TWISTS, TWIST_PROBABILITY};

use crate::decision_tree::NodeId;

/// The random choices behind one event description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSketch<'a> {
    pub theme: &'a str,
    pub location: &'a str,
    pub character: &'a str,
    pub twist: Option<&'static str>,
}

impl<'a> EventSketch<'a> {
    /// Draw the ingredients of an event.
    ///
    /// Consumes four draws, or five when a twist is chosen, in the order
    /// theme, location, character, coin, twist.
    pub fn draw<S>(stream: &mut S, palette: &'a StoryPalette) -> Self
    where
        S: RandomStream + ?Sized,
    {
        let theme = palette.themes()[stream.index(palette.themes().len())].as_str();
        let location = palette.locations()[stream.index(palette.locations().len())].as_str();
        let character = palette.characters()[stream.index(palette.characters().len())].as_str();

        let twist = if stream.unit() < TWIST_PROBABILITY {
            Some(TWISTS[stream.index(TWISTS.len())])
        } else {
            None
        };

        Self {
            theme,
            location,
            character,
            twist,
        }
    }

    /// Compose the final text for a node.
    pub fn render(&self, node: &NodeId) -> String {
        let mut sentences = vec![
            scene_sentence(self.location, self.character, self.theme),
            node_sentence(&node.to_string()),
        ];
        if let Some(twist) = self.twist {
            sentences.push(twist.to_string());
        }
        sentences.join(" ")
    }
}

/// Generate the description for a node, advancing the stream.
pub fn describe_event<S>(stream: &mut S, palette: &StoryPalette, node: &NodeId) -> String
where
    S: RandomStream + ?Sized,
{
    EventSketch::draw(stream, palette).render(node)
}
