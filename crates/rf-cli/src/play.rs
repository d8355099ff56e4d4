//! The interactive play loop.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use rf_combat::{BattleKind, PlayerAction};
use rf_core::WeaponType;
use rf_session::camp::CampReport;
use rf_session::{
    BattleConclusion, CampActivity, GameSession, SessionConfig, SessionError, SessionResult,
};
use rf_story::StepView;

/// What part of the game the prompt is currently driving.
enum Mode {
    /// Reading story nodes and picking choices.
    Story,
    /// In camp, running activities.
    Camp,
    /// Fighting.
    Battle,
}

/// What the loop should do after handling a step.
enum Flow {
    /// Keep going in the given mode.
    Continue(Mode),
    /// The run is over.
    End,
}

/// Run the play loop until the saga ends or input closes.
pub fn run(seed: u64, bundle: &str) -> SessionResult<()> {
    let config = SessionConfig::default().with_seed(seed).with_bundle(bundle);
    let mut session = GameSession::new(config)?;

    println!("{}", "RAVENFALL".bold());
    println!("{}", "two ravens watch everything you do".dimmed());

    let view = session.start_story()?;
    render_story(&view);
    let mut mode = match follow_transition(&mut session, &view)? {
        Flow::Continue(mode) => mode,
        Flow::End => return Ok(()),
    };
    prompt(&mode);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim().to_lowercase();
        if input == "quit" || input == "q" {
            break;
        }
        if input == "stats" {
            print_stats(&session);
            prompt(&mode);
            continue;
        }

        let flow = match mode {
            Mode::Story => step_story(&mut session, &input)?,
            Mode::Camp => step_camp(&mut session, &input)?,
            Mode::Battle => step_battle(&mut session, &input)?,
        };
        match flow {
            Flow::Continue(next) => mode = next,
            Flow::End => return Ok(()),
        }
        prompt(&mode);
    }
    Ok(())
}

fn step_story(session: &mut GameSession, input: &str) -> SessionResult<Flow> {
    let current = session.story_view();
    let view = if current.awaiting_ack {
        session.acknowledge()?
    } else if !current.choices.is_empty() {
        match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= current.choices.len() => session.submit_choice(n - 1)?,
            _ => {
                println!("pick a number between 1 and {}", current.choices.len());
                return Ok(Flow::Continue(Mode::Story));
            }
        }
    } else {
        current
    };

    if view.finished {
        println!("\n{}", "Here the saga rests.".bold());
        return Ok(Flow::End);
    }
    render_story(&view);
    follow_transition(session, &view)
}

fn follow_transition(session: &mut GameSession, view: &StepView) -> SessionResult<Flow> {
    match view.transition {
        Some(rf_story::Transition::Battle(kind)) => {
            start_battle(session, kind)?;
            Ok(Flow::Continue(Mode::Battle))
        }
        Some(rf_story::Transition::Camp) => {
            println!(
                "\n{}",
                "You are in camp. rest, hunt, train <weapon>, gamble <stake>, leave".dimmed()
            );
            Ok(Flow::Continue(Mode::Camp))
        }
        Some(rf_story::Transition::GameOver) => {
            println!("\n{}", "The ravens settle. Your saga ends here.".red());
            Ok(Flow::End)
        }
        None => Ok(Flow::Continue(Mode::Story)),
    }
}

fn step_camp(session: &mut GameSession, input: &str) -> SessionResult<Flow> {
    if input == "leave" || input == "l" {
        let view = session.leave_camp()?;
        render_story(&view);
        return follow_transition(session, &view);
    }
    match parse_camp(input) {
        Some(activity) => match session.camp_activity(&activity) {
            Ok(report) => render_camp(&report),
            Err(SessionError::Core(err)) => println!("{} {err}", "cannot:".yellow()),
            Err(other) => return Err(other),
        },
        None => println!("camp commands: rest, hunt, train <weapon>, gamble <stake>, leave"),
    }
    Ok(Flow::Continue(Mode::Camp))
}

fn start_battle(session: &mut GameSession, kind: BattleKind) -> SessionResult<()> {
    let battle = session.init_battle(kind)?;
    println!("\n{}", battle.enemy().flavor.italic());
    println!("{} bars your way.", battle.enemy().name.bold());
    print_battle_status(session);
    print_battle_help(session);
    Ok(())
}

fn step_battle(session: &mut GameSession, input: &str) -> SessionResult<Flow> {
    let Some(action) = parse_battle_action(session, input) else {
        print_battle_help(session);
        return Ok(Flow::Continue(Mode::Battle));
    };
    let events = match session.submit_player_action(&action) {
        Ok(events) => events,
        Err(SessionError::Combat(err)) => {
            println!("{} {err}", "cannot:".yellow());
            return Ok(Flow::Continue(Mode::Battle));
        }
        Err(other) => return Err(other),
    };
    for event in &events {
        println!("  {event}");
    }

    let concluded = session
        .query_battle_state()
        .is_some_and(|b| b.outcome().is_some());
    if !concluded {
        print_battle_status(session);
        return Ok(Flow::Continue(Mode::Battle));
    }

    match session.conclude_battle()? {
        BattleConclusion::Continue(view) => {
            render_story(&view);
            follow_transition(session, &view)
        }
        BattleConclusion::GameOver => {
            println!("\n{}", "The ravens settle. Your saga ends here.".red());
            Ok(Flow::End)
        }
    }
}

fn parse_battle_action(session: &GameSession, input: &str) -> Option<PlayerAction> {
    match input {
        "f" | "feint" => Some(PlayerAction::Feint),
        "t" | "throw" => Some(PlayerAction::Throw),
        "d" | "defend" => Some(PlayerAction::Defend),
        "r" | "recover" => Some(PlayerAction::Recover),
        "e" | "evade" => Some(PlayerAction::Evade),
        _ => {
            let n: usize = input.parse().ok()?;
            let abilities = usable_abilities(session);
            abilities
                .get(n.checked_sub(1)?)
                .map(|id| PlayerAction::UseAbility(id.clone()))
        }
    }
}

fn usable_abilities(session: &GameSession) -> Vec<String> {
    let weapon = session.player().equipped_weapon;
    session
        .catalog()
        .for_weapon(weapon)
        .into_iter()
        .filter(|a| !a.requires_unlock || session.player().has_unlocked(weapon, &a.id))
        .map(|a| a.id.clone())
        .collect()
}

fn print_battle_help(session: &GameSession) {
    let weapon = session.player().equipped_weapon;
    println!("{}", "your moves:".dimmed());
    for (i, id) in usable_abilities(session).iter().enumerate() {
        if let Some(ability) = session.catalog().get(id) {
            println!(
                "  {}. {} ({} energy)",
                i + 1,
                ability.name,
                ability.energy_cost
            );
        }
    }
    println!("  f)eint  t)hrow  d)efend  r)ecover  e)vade   [{weapon}]");
}

fn print_battle_status(session: &GameSession) {
    if let Some(battle) = session.query_battle_state() {
        println!(
            "{}",
            format!(
                "you {} hp, {} en   |   {} {} hp, {} en",
                battle.player_health(),
                battle.player_energy(),
                battle.enemy().name,
                battle.enemy_health(),
                battle.enemy_energy(),
            )
            .dimmed()
        );
    }
}

fn render_story(view: &StepView) {
    println!("\n{}", view.text);
    if view.awaiting_ack {
        println!("{}", "[enter to continue]".dimmed());
    }
    for (i, choice) in view.choices.iter().enumerate() {
        println!("  {}. {choice}", i + 1);
    }
}

fn render_camp(report: &CampReport) {
    let sign = if report.modifier >= 0 { "+" } else { "-" };
    let verdict = if report.success {
        "success".green()
    } else {
        "failure".red()
    };
    println!(
        "  d20: {} {sign} {} = {} vs {}  {verdict}",
        report.roll,
        report.modifier.abs(),
        report.total,
        report.difficulty,
    );
    println!("  {}", report.message);
}

fn parse_camp(input: &str) -> Option<CampActivity> {
    let mut parts = input.split_whitespace();
    match parts.next()? {
        "rest" => Some(CampActivity::Rest),
        "hunt" => Some(CampActivity::Hunt),
        "train" => {
            let weapon = WeaponType::parse(parts.next()?).ok()?;
            Some(CampActivity::Train(weapon))
        }
        "gamble" => {
            let stake = parts.next()?.parse().ok()?;
            Some(CampActivity::Gamble { stake })
        }
        _ => None,
    }
}

fn print_stats(session: &GameSession) {
    let p = session.player();
    println!(
        "level {}  exp {}/{}  hp {}  en {}  gold {}  rep {}  ravens {}w/{}b",
        p.level,
        p.exp,
        p.exp_to_next_level(),
        p.health,
        p.energy,
        p.gold(),
        p.reputation,
        p.white_raven,
        p.black_raven,
    );
    for weapon in WeaponType::ALL {
        let m = p.mastery(weapon);
        println!("  {weapon}: mastery {} ({} exp)", m.level, m.exp);
    }
}

fn prompt(mode: &Mode) {
    let tag = match mode {
        Mode::Story => "story",
        Mode::Camp => "camp",
        Mode::Battle => "battle",
    };
    print!("{} ", format!("[{tag}]>").dimmed());
    let _ = io::stdout().flush();
}
