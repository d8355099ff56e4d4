//! The game session: one place that owns everything.

use std::path::Path;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rf_combat::{
    Battle, BattleEvent, BattleKind, ModifierRegistry, Outcome, Phase, PlayerAction,
    ability::AbilityCatalog,
};
use rf_core::{PlayerState, bundle};
use rf_skills::{SkillTree, preset};
use rf_story::{Chapter, NodeId, StepView, StoryInterpreter, Transition};

use crate::camp::{self, CampActivity, CampReport};
use crate::config::SessionConfig;
use crate::content;
use crate::error::{SessionError, SessionResult};
use crate::external::{Screen, ScreenTransitions};
use crate::save::SaveGame;

/// What happens after a concluded battle is acknowledged.
#[derive(Debug)]
pub enum BattleConclusion {
    /// Victory: the story resumes at the stored node.
    Continue(StepView),
    /// Defeat: control passes to the game-over screen.
    GameOver,
}

/// A complete, self-contained game session.
///
/// All state is owned here and injected into the subsystem calls, so
/// parallel sessions (and parallel tests) are fully independent.
pub struct GameSession {
    config: SessionConfig,
    chapters: Vec<Chapter>,
    start_chapter: String,
    player: PlayerState,
    registry: ModifierRegistry,
    catalog: AbilityCatalog,
    skills: SkillTree,
    story: StoryInterpreter,
    battle: Option<Battle>,
    rng: StdRng,
    screens: Option<Box<dyn ScreenTransitions>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("chapters", &self.chapters)
            .field("start_chapter", &self.start_chapter)
            .field("player", &self.player)
            .field("registry", &self.registry)
            .field("catalog", &self.catalog)
            .field("skills", &self.skills)
            .field("story", &self.story)
            .field("battle", &self.battle)
            .field("screens", &self.screens.as_ref().map(|_| "<screens>"))
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Create a session over the built-in demo campaign.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        Self::with_campaign(config, content::demo_campaign(), content::START_CHAPTER)
    }

    /// Create a session over custom story content.
    pub fn with_campaign(
        config: SessionConfig,
        chapters: Vec<Chapter>,
        start_chapter: &str,
    ) -> SessionResult<Self> {
        let player = PlayerState::from_bundle(&bundle::by_name(&config.bundle)?);
        let story = StoryInterpreter::new(chapters.clone(), start_chapter)?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            chapters,
            start_chapter: start_chapter.to_string(),
            player,
            registry: ModifierRegistry::new(),
            catalog: AbilityCatalog::standard(),
            skills: preset::default_tree(),
            story,
            battle: None,
            rng,
            screens: None,
            config,
        })
    }

    /// Plug in a screen transition service.
    pub fn attach_screens(&mut self, screens: Box<dyn ScreenTransitions>) {
        self.screens = Some(screens);
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Mutable access to the player state, for external collaborators
    /// that mutate it directly (story-style effects, custom camp games).
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// The modifier registry.
    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    /// The skill tree.
    pub fn skills(&self) -> &SkillTree {
        &self.skills
    }

    /// The ability catalog.
    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// The story interpreter (read-only).
    pub fn story(&self) -> &StoryInterpreter {
        &self.story
    }

    /// Replace the character wholesale from a named stat bundle and
    /// restart the story: the "new game" path.
    pub fn initialize_player_stats(&mut self, bundle_name: &str) -> SessionResult<()> {
        let template = bundle::by_name(bundle_name)?;
        tracing::debug!(bundle = bundle_name, "initializing player stats");
        self.player = PlayerState::from_bundle(&template);
        self.registry = ModifierRegistry::new();
        self.skills = preset::default_tree();
        self.battle = None;
        self.story = StoryInterpreter::new(self.chapters.clone(), &self.start_chapter)?;
        Ok(())
    }

    /// Enter the campaign's first node.
    pub fn start_story(&mut self) -> SessionResult<StepView> {
        let view = self.story.start(&mut self.player)?;
        Ok(self.after_story_step(view))
    }

    /// Enter a story node by id.
    pub fn display_story_text(&mut self, node: NodeId) -> SessionResult<StepView> {
        let view = self.story.enter(node, &mut self.player)?;
        Ok(self.after_story_step(view))
    }

    /// Select one of the visible choices.
    pub fn submit_choice(&mut self, index: usize) -> SessionResult<StepView> {
        let view = self.story.choose(index, &mut self.player)?;
        Ok(self.after_story_step(view))
    }

    /// Resolve a pending story acknowledgment.
    pub fn acknowledge(&mut self) -> SessionResult<StepView> {
        let view = self.story.acknowledge(&mut self.player)?;
        Ok(self.after_story_step(view))
    }

    /// The current story view, without advancing.
    pub fn story_view(&self) -> StepView {
        self.story.view(&self.player)
    }

    /// Start a staged battle.
    pub fn init_battle(&mut self, kind: BattleKind) -> SessionResult<&Battle> {
        let battle = Battle::new(kind, &self.player, &self.catalog)?;
        tracing::debug!(%kind, enemy = %battle.enemy().name, "battle started");
        self.notify(Screen::Story, Screen::Battle);
        Ok(self.battle.insert(battle))
    }

    /// Submit a player battle action, then resolve the enemy turn.
    ///
    /// Returns every event from both halves in order. When this call
    /// produces the victory, the reward write-back happens here too.
    pub fn submit_player_action(
        &mut self,
        action: &PlayerAction,
    ) -> SessionResult<Vec<BattleEvent>> {
        let Some(battle) = self.battle.as_mut() else {
            return Err(SessionError::NoBattle);
        };
        let was_over = battle.outcome().is_some();
        let mut events = battle.submit_player_action(
            action,
            &self.player,
            &self.registry,
            &self.catalog,
            &mut self.rng,
        )?;
        if battle.phase() == Phase::Enemy {
            events.extend(battle.resolve_enemy_turn(&self.player, &self.registry, &mut self.rng));
        }
        if !was_over && battle.outcome() == Some(Outcome::Victory) {
            events.extend(battle.apply_victory_rewards(&mut self.player));
        }
        Ok(events)
    }

    /// The running (or just-concluded) battle, if any.
    pub fn query_battle_state(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Acknowledge a concluded battle: drop it and either resume the
    /// story (victory) or hand control to the game-over screen.
    pub fn conclude_battle(&mut self) -> SessionResult<BattleConclusion> {
        let Some(battle) = self.battle.as_ref() else {
            return Err(SessionError::NoBattle);
        };
        match battle.outcome() {
            None => Err(SessionError::BattleStillRunning),
            Some(Outcome::Victory) => {
                self.battle = None;
                self.notify(Screen::Battle, Screen::Story);
                let view = self.story.resume_after_transition(&mut self.player)?;
                Ok(BattleConclusion::Continue(self.after_story_step(view)))
            }
            Some(Outcome::Defeat) => {
                self.battle = None;
                self.notify(Screen::Battle, Screen::GameOver);
                Ok(BattleConclusion::GameOver)
            }
        }
    }

    /// Spend a skill point. Returns the new rank.
    pub fn apply_skill_point(&mut self, branch: &str, skill: &str) -> SessionResult<u32> {
        Ok(self
            .skills
            .apply_skill_point(branch, skill, &mut self.player, &mut self.registry)?)
    }

    /// Full skill respec: refund points, purge skill-tree modifiers.
    pub fn reset_skills(&mut self) {
        self.skills.reset(&mut self.player, &mut self.registry);
    }

    /// Run a camp activity.
    pub fn camp_activity(&mut self, activity: &CampActivity) -> SessionResult<CampReport> {
        Ok(camp::resolve(activity, &mut self.player, &mut self.rng)?)
    }

    /// Leave camp and resume the story.
    pub fn leave_camp(&mut self) -> SessionResult<StepView> {
        self.notify(Screen::Camp, Screen::Story);
        let view = self.story.resume_after_transition(&mut self.player)?;
        Ok(self.after_story_step(view))
    }

    /// Write the session to a save file. Battles are not saved.
    pub fn save_to(&self, path: &Path) -> SessionResult<()> {
        let save = SaveGame {
            saved_at: Utc::now(),
            player: self.player.clone(),
            skill_ranks: self.skills.ranks().clone(),
            branch_points: self.skills.all_branch_points().clone(),
            chapter: self.story.chapter_id().to_string(),
            node: self.story.node_id(),
            progress: self.story.progress().clone(),
        };
        save.write_to(path)
    }

    /// Restore a session from a save file over the demo campaign.
    ///
    /// Skill-tree modifiers are rebuilt from the saved ranks; the RNG
    /// restarts from the configured seed.
    pub fn load_from(path: &Path, config: SessionConfig) -> SessionResult<Self> {
        let save = SaveGame::read_from(path)?;
        let mut session = Self::new(config)?;
        session.player = save.player;
        session.skills.restore_ranks(save.skill_ranks, save.branch_points);
        session.registry = ModifierRegistry::new();
        session.skills.rebuild_modifiers(&mut session.registry);
        session.story.set_progress(save.progress);
        session.story.restore_position(&save.chapter, save.node)?;
        Ok(session)
    }

    fn after_story_step(&mut self, view: StepView) -> StepView {
        if let Some(transition) = view.transition {
            let to = match transition {
                Transition::Camp => Screen::Camp,
                Transition::Battle(_) => Screen::Battle,
                Transition::GameOver => Screen::GameOver,
            };
            // Battles notify when init_battle actually runs.
            if to != Screen::Battle {
                self.notify(Screen::Story, to);
            }
        }
        view
    }

    fn notify(&mut self, from: Screen, to: Screen) {
        if let Some(screens) = self.screens.as_mut() {
            screens.transition(from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use rf_core::{Attribute, WeaponType};

    fn session() -> GameSession {
        GameSession::new(SessionConfig::default()).unwrap()
    }

    /// Stack the player so the first battle cannot realistically be lost.
    fn make_overwhelming(session: &mut GameSession) {
        let player = session.player_mut();
        player.set_attribute(Attribute::WeaponSkill, 50);
        player.set_attribute(Attribute::Agility, 50);
        player.armor_value = 40;
    }

    fn fight_to_victory(session: &mut GameSession) {
        for _ in 0..300 {
            let battle = session.query_battle_state().unwrap();
            if battle.outcome().is_some() {
                break;
            }
            let action = if battle.player_energy().current() < 10 {
                PlayerAction::Recover
            } else {
                PlayerAction::UseAbility("sword_slash".to_string())
            };
            session.submit_player_action(&action).unwrap();
        }
        assert_eq!(
            session.query_battle_state().unwrap().outcome(),
            Some(Outcome::Victory)
        );
    }

    #[test]
    fn new_session_uses_config_bundle() {
        let s = GameSession::new(SessionConfig::default().with_bundle("hunter")).unwrap();
        assert_eq!(s.player().equipped_weapon, WeaponType::Axe);
    }

    #[test]
    fn unknown_bundle_is_rejected() {
        let err = GameSession::new(SessionConfig::default().with_bundle("jarl")).unwrap_err();
        assert!(matches!(err, SessionError::Core(_)));
    }

    #[test]
    fn battle_commands_require_a_battle() {
        let mut s = session();
        assert!(matches!(
            s.submit_player_action(&PlayerAction::Defend).unwrap_err(),
            SessionError::NoBattle
        ));
        assert!(matches!(
            s.conclude_battle().unwrap_err(),
            SessionError::NoBattle
        ));
    }

    #[test]
    fn conclude_requires_a_terminal_battle() {
        let mut s = session();
        s.init_battle(BattleKind::Raider).unwrap();
        assert!(matches!(
            s.conclude_battle().unwrap_err(),
            SessionError::BattleStillRunning
        ));
    }

    #[test]
    fn story_reaches_the_first_battle_and_resumes_after_victory() {
        let mut s = session();
        make_overwhelming(&mut s);

        let view = s.start_story().unwrap();
        assert!(view.awaiting_ack);
        let view = s.acknowledge().unwrap();
        assert_eq!(view.choices.len(), 3);

        // Take the north road, clear the ledge check, reach the battle.
        let view = s.submit_choice(2).unwrap();
        assert!(view.awaiting_ack, "stat check text gates the advance");
        let view = s.acknowledge().unwrap();
        let Some(Transition::Battle(kind)) = view.transition else {
            panic!("expected a battle transition, got {view:?}");
        };

        s.init_battle(kind).unwrap();
        fight_to_victory(&mut s);

        let BattleConclusion::Continue(view) = s.conclude_battle().unwrap() else {
            panic!("victory should resume the story");
        };
        assert!(view.text.contains("rearguard will trouble no one"));
        assert!(
            s.player().mastery(WeaponType::Sword).level > 1,
            "victory granted mastery experience"
        );
    }

    #[test]
    fn camp_transition_and_activities() {
        let mut s = session();
        make_overwhelming(&mut s);
        s.start_story().unwrap();
        s.acknowledge().unwrap();
        s.submit_choice(2).unwrap();
        let view = s.acknowledge().unwrap();
        let Some(Transition::Battle(kind)) = view.transition else {
            panic!("expected battle");
        };
        s.init_battle(kind).unwrap();
        fight_to_victory(&mut s);
        let BattleConclusion::Continue(view) = s.conclude_battle().unwrap() else {
            panic!("expected resume");
        };
        assert!(view.awaiting_ack);
        let view = s.acknowledge().unwrap();
        assert_eq!(view.transition, Some(Transition::Camp));

        let report = s.camp_activity(&CampActivity::Rest).unwrap();
        assert_eq!(report.activity, "rest");

        let view = s.leave_camp().unwrap();
        assert!(view.text.contains("coast road"));
    }

    #[test]
    fn skill_points_flow_through_the_session() {
        let mut s = session();
        s.player_mut().skill_points = 3;
        let rank = s.apply_skill_point("duelist", "sword_edge").unwrap();
        assert_eq!(rank, 1);
        assert_eq!(s.registry().len(), 1);
        assert_eq!(s.player().skill_points, 2);

        s.reset_skills();
        assert_eq!(s.player().skill_points, 3);
        assert!(s.registry().is_empty());
    }

    #[test]
    fn initialize_player_stats_replaces_wholesale() {
        let mut s = session();
        s.player_mut().skill_points = 3;
        s.apply_skill_point("duelist", "sword_edge").unwrap();
        s.player_mut().add_experience(500);

        s.initialize_player_stats("wanderer").unwrap();
        assert_eq!(s.player().level, 1);
        assert_eq!(s.player().skill_points, 0);
        assert!(s.registry().is_empty());
        assert_eq!(s.skills().rank("sword_edge"), 0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut s = session();
        s.player_mut().skill_points = 3;
        s.apply_skill_point("duelist", "sword_edge").unwrap();
        s.start_story().unwrap();
        s.acknowledge().unwrap();
        s.save_to(&path).unwrap();

        let loaded = GameSession::load_from(&path, SessionConfig::default()).unwrap();
        assert_eq!(loaded.skills().rank("sword_edge"), 1);
        assert_eq!(
            loaded.registry().len(),
            1,
            "modifiers rebuilt from saved ranks"
        );
        assert_eq!(loaded.story().chapter_id(), "embers");
        assert_eq!(loaded.story().node_id(), NodeId::new(2));
        assert!(loaded.story().progress().has_visited("embers", NodeId::new(1)));
    }

    #[test]
    fn screen_transitions_are_notified() {
        #[derive(Default)]
        struct Recorder(Rc<RefCell<Vec<(Screen, Screen)>>>);
        impl ScreenTransitions for Recorder {
            fn transition(&mut self, from: Screen, to: Screen) {
                self.0.borrow_mut().push((from, to));
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut s = session();
        s.attach_screens(Box::new(Recorder(Rc::clone(&log))));
        s.init_battle(BattleKind::Raider).unwrap();
        assert_eq!(*log.borrow(), vec![(Screen::Story, Screen::Battle)]);
    }
}
