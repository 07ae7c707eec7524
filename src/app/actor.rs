//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let commands = self.state.handle_response(response);
                    self.send_all(commands);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let commands = match event {
            // Navigation
            UiEvent::SwitchTab(tab) => {
                self.state.switch_tab(tab);
                Vec::new()
            }
            UiEvent::DismissView => self.state.dismiss_view(),

            // Stats
            UiEvent::Search(target) => self.state.search(target),
            UiEvent::LoadPlayer(tag) => self.state.load_player(tag),
            UiEvent::Refresh => self.state.refresh(),
            UiEvent::SearchClans(name) => self.state.search_clans(name),

            // Leaderboards
            UiEvent::LoadRankings { location, limit } => self.state.load_rankings(location, limit),
            UiEvent::LoadCards => self.state.load_cards(),

            // Deck wallet
            UiEvent::Register { device_id } => self.state.register(device_id),
            UiEvent::SaveDeck { name, cards } => self.state.save_deck(name, cards),
            UiEvent::RemoveDeck { deck_id } => self.state.remove_deck(deck_id),
            UiEvent::RefreshSession => self.state.refresh_session(),

            // Menus and sheets
            UiEvent::Menu(action) => self.state.apply_menu_action(action),
            UiEvent::DismissShareSheet => {
                self.state.dismiss_share_sheet();
                Vec::new()
            }
            UiEvent::DismissAddDeckMenu => {
                self.state.dismiss_add_deck_menu();
                Vec::new()
            }

            // System
            UiEvent::Quit => return true,
        };

        self.send_all(commands);
        false
    }
}
