mod panels;

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::{BindAction, Keybinds};
use crate::domain::round::{ChoiceRequested, Hud, ResetRequested, RoundSystems, Session};
use crate::domain::scene::{ChoiceModel, ScreenTint};
use crate::domain::settings::GameSettings;
use panels::{
    banners, controls_panel, diagnostics_panel, help_panel, scoreboard_panel, settings_panel,
};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, ui_system.before(RoundSystems));
    }
}

#[allow(clippy::too_many_arguments)]
fn ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<GameSettings>,
    hud: Res<Hud>,
    tint: Res<ScreenTint>,
    mut keybinds: ResMut<Keybinds>,
    mut rebinding: Local<Option<BindAction>>,
    session: Option<Res<Session>>,
    diagnostics: Res<DiagnosticsStore>,
    models: Query<&ChoiceModel>,
    mut ev_choice: EventWriter<ChoiceRequested>,
    mut ev_reset: EventWriter<ResetRequested>,
) {
    let ctx = contexts.ctx_mut();
    // Panels edit copies so untouched widgets don't flag the resources as changed.
    let mut edited = settings.clone();
    let mut edited_keys = keybinds.clone();

    banners::show_win_tint(ctx, tint.alpha());
    scoreboard_panel::show_scoreboard(ctx, &hud.scores);
    banners::show_status_banner(ctx, &hud.status);

    let input = controls_panel::show_controls_panel(ctx, hud.highlighted, &mut edited);
    if let Some(choice) = input.choice {
        ev_choice.send(ChoiceRequested(choice));
    }
    if input.reset {
        ev_reset.send(ResetRequested);
    }

    settings_panel::show_settings_panel(ctx, &mut edited, &mut edited_keys, &mut rebinding);
    help_panel::show_help_panel(ctx, &edited, &edited_keys);
    let on_stage: Vec<_> = models.iter().map(|model| model.0).collect();
    diagnostics_panel::show_diagnostics_panel(
        ctx,
        &diagnostics,
        &edited,
        session.as_deref(),
        &on_stage,
    );

    settings.set_if_neq(edited);
    keybinds.set_if_neq(edited_keys);
}
