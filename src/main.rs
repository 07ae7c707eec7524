//! Royale Stats - terminal front-end
//!
//! Architecture:
//! - Command line - turned into a single UI event
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use anyhow::{anyhow, bail};
use tokio::sync::mpsc;

use royale_stats::constants::{APP_NAME, APP_VERSION, ENV_API_TOKEN};
use royale_stats::messages::ui_events::command_to_ui_event;
use royale_stats::models::battle::BattlerSide;
use royale_stats::models::card::average_elixir;
use royale_stats::models::links::deck_link_for;
use royale_stats::models::{Card, PlayerBattle};
use royale_stats::{
    AppActor, AppState, ClientConfig, NetworkActor, NetworkCommand, NetworkResponse, RenderState,
    Storage, UiEvent,
};

const USAGE: &str = "\
Usage: royale-stats <command> [args]

Commands:
  player TAG              Player profile
  battles TAG             Recent battles with decks
  deck-link TAG           Copy-deck link for the player's current deck
  clan TAG                Clan profile and members
  search-clans NAME       Find clans by name
  rankings [LOCATION] [N] Trophy leaderboard (`global` or a location id)
  cards                   All cards
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "royale-stats.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help" | "help") {
        println!("{} {}\n\n{}", APP_NAME, APP_VERSION, USAGE);
        return Ok(());
    }
    let event = command_to_ui_event(&args)?;

    let storage = Storage::new();
    let config = ClientConfig::from_settings(&storage.settings).with_env();
    if config.api_token.is_none() {
        bail!("no API token: set {} or add `api_token` to the settings file", ENV_API_TOKEN);
    }

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(&config, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(storage), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    ui_tx.send(event)?;
    let state = wait_until_idle(&mut render_rx).await?;
    let _ = ui_tx.send(UiEvent::Quit);

    if let Some(error) = &state.last_error {
        bail!("{}", error);
    }
    print_report(&args[0], &state)
}

/// Wait for the first render state with every issued request settled
async fn wait_until_idle(
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<RenderState> {
    while let Some(state) = render_rx.recv().await {
        if state.requests_issued > 0 && !state.is_loading {
            return Ok(state);
        }
    }
    Err(anyhow!("app stopped before the request finished"))
}

fn print_report(command: &str, state: &RenderState) -> anyhow::Result<()> {
    match command {
        "player" => {
            let player = state.player.as_ref().ok_or_else(|| anyhow!("no player loaded"))?;
            println!("{} ({})", player.name, player.tag);
            if let Some(clan) = &player.clan {
                println!("  Clan:      {} ({})", clan.name, clan.tag);
            }
            println!("  Level:     {}", player.exp_level);
            println!("  Trophies:  {} (best {})", player.trophies, player.best_trophies);
            if let Some(rate) = player.win_rate() {
                println!("  Wins:      {} / {} ({:.1}%)", player.wins, player.losses, rate);
            }
            println!("  Deck:      {}", deck_line(&player.current_deck));
        }
        "battles" => {
            for battle in &state.battles {
                print_battle(battle);
            }
        }
        "deck-link" => {
            let player = state.player.as_ref().ok_or_else(|| anyhow!("no player loaded"))?;
            let link = deck_link_for(&player.current_deck)
                .ok_or_else(|| anyhow!("{} has no complete deck", player.name))?;
            println!("{}", link);
        }
        "clan" => {
            let clan = state.clan.as_ref().ok_or_else(|| anyhow!("no clan loaded"))?;
            println!("{} ({}) - {} members, score {}", clan.name, clan.tag, clan.members, clan.clan_score);
            for member in &clan.member_list {
                println!(
                    "  {:>2}. {:<20} {:<10} {:>5}",
                    member.clan_rank,
                    member.name,
                    member.role.as_str(),
                    member.trophies
                );
            }
        }
        "search-clans" => {
            for clan in &state.clan_results {
                println!("{:<12} {:<24} {:>2} members  score {}", clan.tag, clan.name, clan.members, clan.clan_score);
            }
        }
        "rankings" => {
            for entry in &state.rankings {
                let clan = entry.clan.as_ref().map(|c| c.name.as_str()).unwrap_or("");
                println!("{:>4}. {:<20} {:>5}  {}", entry.rank, entry.name, entry.trophies, clan);
            }
        }
        "cards" => {
            for card in &state.cards {
                let rarity = card.rarity.map(|r| r.as_str()).unwrap_or("?");
                println!("{:<10} {:<24} {}", card.id, card.name, rarity);
            }
        }
        _ => {}
    }
    Ok(())
}

fn print_battle(battle: &PlayerBattle) {
    let when = battle
        .played_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| battle.battle_time.clone());
    println!("{} {} - {}", when, battle.mode_name(), battle.outcome().as_str());

    for side in [BattlerSide::Team, BattlerSide::Opponent] {
        for (index, battler) in battle.side(side).iter().enumerate() {
            let trophies = battler
                .trophy_change
                .map(|c| format!(" ({:+})", c))
                .unwrap_or_default();
            println!("  {} [{}] {} crowns{}", battler.name, battler.clan_name(), battler.crowns, trophies);
            for deck in battle.decks(side, index) {
                println!("    {}", deck_line(deck));
            }
        }
    }
}

fn deck_line(cards: &[Card]) -> String {
    let names: Vec<String> = cards.iter().map(Card::label).collect();
    match average_elixir(cards) {
        Some(avg) => format!("{} | {:.1} elixir", names.join(", "), avg),
        None => names.join(", "),
    }
}
