//! The built-in demo campaign.
//!
//! Two short chapters exercising every story feature: stat checks,
//! raven-alignment choices, once-only options, the camp screen, both
//! staged battles, and a chapter swap.

use rf_combat::BattleKind;
use rf_core::{Attribute, FlagValue};
use rf_story::{
    Chapter, CheckBranch, Choice, Condition, NodeId, StatCheck, StoryEffect, StoryNode, Transition,
};

/// The chapter a new game opens on.
pub const START_CHAPTER: &str = "embers";

/// Build the demo campaign's chapters.
pub fn demo_campaign() -> Vec<Chapter> {
    vec![embers(), grey_coast()]
}

fn embers() -> Chapter {
    Chapter::new(
        "embers",
        "Embers of Hvitmark",
        NodeId::new(1),
        vec![
            StoryNode::text(
                NodeId::new(1),
                "Smoke hangs over Hvitmark. The raiders left at dawn; the dead did not leave at all.",
            )
            .with_next(NodeId::new(2)),
            StoryNode::text(
                NodeId::new(2),
                "By the burned boathouse an old fisherman sorts what the fire spared.",
            )
            .with_choice(
                Choice::new("Help him carry the salvage", NodeId::new(2))
                    .with_condition(Condition::NotChosen {
                        node: NodeId::new(2),
                        index: 0,
                    })
                    .with_effect(StoryEffect::GainWhiteRaven(1))
                    .with_effect(StoryEffect::AdjustReputation(5))
                    .with_response(
                        "You work until your shoulders burn. He says nothing, but presses a dried fish into your hand.",
                    ),
            )
            .with_choice(
                Choice::new("Search the wreck for coin instead", NodeId::new(2))
                    .with_condition(Condition::NotChosen {
                        node: NodeId::new(2),
                        index: 1,
                    })
                    .with_effect(StoryEffect::GainBlackRaven(1))
                    .with_effect(StoryEffect::AdjustGold(12))
                    .with_response("Under a charred plank: a purse the fire missed. The fisherman watches, and says nothing."),
            )
            .with_choice(Choice::new("Take the north road", NodeId::new(3))),
            StoryNode::text(
                NodeId::new(3),
                "A rockslide has buried the north road. There is a narrow ledge above it.",
            )
            .with_stat_check(StatCheck::new(
                Attribute::Agility,
                6,
                CheckBranch::new()
                    .with_text("You cross the ledge without dislodging a pebble.")
                    .with_next(NodeId::new(4)),
                CheckBranch::new()
                    .with_text("Halfway across, the ledge crumbles. You land badly among the stones.")
                    .with_effect(StoryEffect::AdjustHealth(-10))
                    .with_next(NodeId::new(4)),
            )),
            StoryNode::text(
                NodeId::new(4),
                "Beyond the slide, a figure waits on the road: one of the raiders, left behind as rearguard.",
            )
            .with_on_enter(StoryEffect::SetFlag {
                key: "met_rearguard".to_string(),
                value: FlagValue::Bool(true),
            })
            .with_transition(Transition::Battle(BattleKind::Raider))
            .with_next(NodeId::new(5)),
            StoryNode::text(
                NodeId::new(5),
                "The rearguard will trouble no one again. Night is falling; ahead, firelight marks a traveler's camp.",
            )
            .with_next(NodeId::sub(5, 1)),
            StoryNode::text(
                NodeId::sub(5, 1),
                "The camp takes you in without questions. There is time here to rest, train, and trade.",
            )
            .with_transition(Transition::Camp)
            .with_next(NodeId::new(6)),
            StoryNode::text(
                NodeId::new(6),
                "At first light you follow the coast road north, toward the grey water.",
            )
            .with_ending(Some("grey-coast")),
        ],
    )
}

fn grey_coast() -> Chapter {
    Chapter::new(
        "grey-coast",
        "The Grey Coast",
        NodeId::new(1),
        vec![
            StoryNode::text(
                NodeId::new(1),
                "The raiders' longship lies beached in the shallows. A huge man waits beside it, axe across his shoulders.",
            )
            .with_next(NodeId::new(2)),
            StoryNode::text(
                NodeId::new(2),
                "\"Turn back,\" he says, \"or feed the gulls.\" He does not look like a man who bluffs.",
            )
            .with_choice(
                Choice::new("Try to talk him aside", NodeId::new(3))
                    .with_stat_check(StatCheck::new(
                        Attribute::Charisma,
                        7,
                        CheckBranch::new()
                            .with_text("Your words find the crack in him; he spits, shoulders his axe, and walks away.")
                            .with_effect(StoryEffect::GainWhiteRaven(1))
                            .with_effect(StoryEffect::GrantExperience(60))
                            .with_next(NodeId::new(4)),
                        CheckBranch::new()
                            .with_text("He listens to three words, then swings.")
                            .with_next(NodeId::new(3)),
                    )),
            )
            .with_choice(Choice::new("Draw steel", NodeId::new(3))),
            StoryNode::battle(
                NodeId::new(3),
                "The berserker comes on like weather.",
                BattleKind::Berserker,
                NodeId::new(4),
            ),
            StoryNode::text(
                NodeId::new(4),
                "The way to the longship is clear. Whatever was taken from Hvitmark is one tide from home.",
            )
            .with_ending(None),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_shape() {
        let chapters = demo_campaign();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].id, START_CHAPTER);
        assert!(!chapters[0].is_empty());
    }

    #[test]
    fn every_next_reference_resolves() {
        for chapter in demo_campaign() {
            let ids: Vec<NodeId> = (1..=6)
                .flat_map(|m| (0..=1).map(move |s| NodeId::sub(m, s)))
                .filter(|id| chapter.get(*id).is_some())
                .collect();
            for id in ids {
                let node = chapter.get(id).unwrap();
                if let Some(next) = node.next {
                    assert!(
                        chapter.get(next).is_some(),
                        "{}: node {} points at missing {}",
                        chapter.id,
                        id,
                        next
                    );
                }
                for choice in &node.choices {
                    assert!(
                        chapter.get(choice.next).is_some(),
                        "{}: choice on {} points at missing {}",
                        chapter.id,
                        id,
                        choice.next
                    );
                }
            }
        }
    }
}
