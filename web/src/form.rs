use crate::gameboard::Gameboard;
use crate::utils::*;
use clap::{Args, ValueEnum};
use minefield_core as game;
use serde::{Deserialize, Serialize};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const NEW_GAME_WARNING: &str =
    "Sure you want to create a new game? You'll lose all progress on your current game.";

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum PlacementArg {
    /// Exactly the requested number of mines
    #[default]
    Exact,
    /// Each block rolls for a mine independently
    Density,
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct FormProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,

    /// How mines are spread over the board
    #[arg(long, value_enum, default_value_t = PlacementArg::Exact)]
    #[prop_or_default]
    pub placement: PlacementArg,

    /// Mine chance in percent when using density placement
    #[arg(long, default_value_t = game::Placement::DEFAULT_DENSITY)]
    #[prop_or(game::Placement::DEFAULT_DENSITY)]
    pub density: u8,
}

impl Default for FormProps {
    fn default() -> Self {
        Self {
            seed: None,
            placement: PlacementArg::Exact,
            density: game::Placement::DEFAULT_DENSITY,
        }
    }
}

impl FormProps {
    fn placement(&self) -> game::Placement {
        match self.placement {
            PlacementArg::Exact => game::Placement::Exact,
            PlacementArg::Density => game::Placement::Density(self.density),
        }
    }
}

/// Board settings remembered between visits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct FormSettings {
    pub config: game::GameConfig,
}

impl StorageKey for FormSettings {
    const KEY: &'static str = "minefield:settings";
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Field {
    Height,
    Width,
    Mines,
}

pub(crate) enum Msg {
    Input(Field, String),
    StartGame,
    MinefieldCreated(game::CellCount),
    FlagCountChange(i32),
    GameStatusChange(game::GameStatus),
}

/// Raw text of the three inputs, validated only when a game is started.
#[derive(Clone, Debug, PartialEq)]
struct FormInputs {
    height: String,
    width: String,
    mines: String,
}

impl FormInputs {
    fn from_config(config: game::GameConfig) -> Self {
        Self {
            height: config.height.to_string(),
            width: config.width.to_string(),
            mines: config.mines.to_string(),
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Height => self.height = value,
            Field::Width => self.width = value,
            Field::Mines => self.mines = value,
        }
    }

    fn parse(&self) -> Result<game::GameConfig, String> {
        fn number<T>(name: &str, value: &str, min: T) -> Result<T, String>
        where
            T: TryFrom<u64> + Bounded + Copy + std::fmt::Display,
        {
            let value: u64 = value
                .trim()
                .parse()
                .map_err(|_| format!("{} must be a whole number", name))?;
            T::try_from(value)
                .map_err(|_| format!("{} must be between {} and {}", name, min, T::MAX))
        }

        let height: game::Coord = number("Height", &self.height, 1)?;
        let width: game::Coord = number("Width", &self.width, 1)?;
        let mines: game::CellCount = number("Mines", &self.mines, 0)?;
        game::GameConfig::try_new(height, width, mines).map_err(|err| err.to_string())
    }
}

/// Upper limit of an input, for range messages.
trait Bounded {
    const MAX: Self;
}

impl Bounded for game::Coord {
    const MAX: Self = game::Coord::MAX;
}

impl Bounded for game::CellCount {
    const MAX: Self = game::CellCount::MAX;
}

const fn status_text(status: game::GameStatus) -> &'static str {
    use game::GameStatus::*;
    match status {
        NotStarted => "Ready",
        InProgress => "Playing",
        Won => "Cleared!",
        Lost => "Boom!",
    }
}

const fn status_class(status: game::GameStatus) -> &'static str {
    use game::GameStatus::*;
    match status {
        NotStarted => "not-started",
        InProgress => "in-progress",
        Won => "win",
        Lost => "lose",
    }
}

pub(crate) struct GameForm {
    settings: FormSettings,
    inputs: FormInputs,
    error: Option<String>,
    generation: u32,
    mines: game::CellCount,
    flags_placed: i32,
    status: game::GameStatus,
}

impl GameForm {
    fn start_game(&mut self) -> bool {
        let config = match self.inputs.parse() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("rejected board settings: {}", err);
                self.error = Some(err);
                return true;
            }
        };

        if self.status == game::GameStatus::InProgress && !gloo::dialogs::confirm(NEW_GAME_WARNING) {
            log::debug!("new game declined");
            return false;
        }

        self.error = None;
        self.settings.config = config;
        self.settings.local_save();
        self.generation = self.generation.wrapping_add(1);
        self.flags_placed = 0;
        true
    }

    fn mines_left(&self) -> i32 {
        i32::from(self.mines) - self.flags_placed
    }

    fn input_view(&self, ctx: &Context<Self>, field: Field, label: &'static str) -> Html {
        let value = match field {
            Field::Height => self.inputs.height.clone(),
            Field::Width => self.inputs.width.clone(),
            Field::Mines => self.inputs.mines.clone(),
        };
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(field, input.value())
        });

        html! {
            <label>
                {label}
                <input type="number" min="1" {value} {oninput}/>
            </label>
        }
    }
}

impl Component for GameForm {
    type Message = Msg;
    type Properties = FormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let settings: FormSettings = LocalOrDefault::local_or_default();
        let settings = if settings.config.validate().is_ok() {
            settings
        } else {
            log::warn!("stored settings are invalid, using defaults");
            FormSettings::default()
        };

        Self {
            settings,
            inputs: FormInputs::from_config(settings.config),
            error: None,
            generation: 0,
            mines: settings.config.mines,
            flags_placed: 0,
            status: game::GameStatus::NotStarted,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Input(field, value) => {
                self.inputs.set(field, value);
                true
            }
            StartGame => self.start_game(),
            MinefieldCreated(mines) => {
                self.mines = mines;
                self.flags_placed = 0;
                true
            }
            FlagCountChange(increment) => {
                self.flags_placed += increment;
                true
            }
            GameStatusChange(status) => {
                log::debug!("game status: {:?}", status);
                let changed = self.status != status;
                self.status = status;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            StartGame
        });
        let on_minefield_created = ctx.link().callback(MinefieldCreated);
        let on_flag_count_change = ctx.link().callback(FlagCountChange);
        let on_game_status_change = ctx.link().callback(GameStatusChange);
        let mines_left = format_for_counter(self.mines_left());

        html! {
            <div class="minefield">
                <form {onsubmit}>
                    {self.input_view(ctx, Field::Height, "Height")}
                    {self.input_view(ctx, Field::Width, "Width")}
                    {self.input_view(ctx, Field::Mines, "Mines")}
                    <button type="submit">{"New game"}</button>
                    if let Some(error) = &self.error {
                        <p class="error">{error.clone()}</p>
                    }
                </form>
                <nav class={status_class(self.status)}>
                    <aside class="mines-left">{mines_left}</aside>
                    <span class="status">{status_text(self.status)}</span>
                </nav>
                <Gameboard
                    config={self.settings.config}
                    placement={ctx.props().placement()}
                    seed={ctx.props().seed}
                    generation={self.generation}
                    {on_minefield_created}
                    {on_flag_count_change}
                    {on_game_status_change}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(height: &str, width: &str, mines: &str) -> FormInputs {
        FormInputs {
            height: height.to_string(),
            width: width.to_string(),
            mines: mines.to_string(),
        }
    }

    #[test]
    fn defaults_round_trip_through_inputs() {
        let config = game::GameConfig::default();
        assert_eq!(FormInputs::from_config(config).parse(), Ok(config));
    }

    #[test]
    fn parse_trims_and_validates() {
        assert_eq!(
            inputs(" 9 ", "9", "10").parse(),
            Ok(game::GameConfig::new_unchecked(9, 9, 10))
        );
        assert_eq!(
            inputs("2", "2", "5").parse(),
            Err(game::GameError::TooManyMines.to_string())
        );
        assert_eq!(
            inputs("0", "2", "1").parse(),
            Err(game::GameError::InvalidSize.to_string())
        );
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert_eq!(
            inputs("abc", "2", "1").parse(),
            Err("Height must be a whole number".to_string())
        );
        assert_eq!(
            inputs("2", "2", "-1").parse(),
            Err("Mines must be a whole number".to_string())
        );
    }

    #[test]
    fn parse_reports_out_of_range_values() {
        assert_eq!(
            inputs("300", "2", "1").parse(),
            Err("Height must be between 1 and 255".to_string())
        );
        assert_eq!(
            inputs("2", "256", "1").parse(),
            Err("Width must be between 1 and 255".to_string())
        );
        assert_eq!(
            inputs("2", "2", "70000").parse(),
            Err("Mines must be between 0 and 65535".to_string())
        );
    }

    fn form(mines: game::CellCount) -> GameForm {
        let settings = FormSettings::default();
        GameForm {
            settings,
            inputs: FormInputs::from_config(settings.config),
            error: None,
            generation: 0,
            mines,
            flags_placed: 0,
            status: game::GameStatus::NotStarted,
        }
    }

    #[test]
    fn mines_left_subtracts_flag_deltas() {
        let mut form = form(80);
        assert_eq!(form.mines_left(), 80);

        form.flags_placed += 1;
        assert_eq!(form.mines_left(), 79);
        assert_eq!(format_for_counter(form.mines_left()), "079");

        form.flags_placed += 1;
        form.flags_placed -= 1;
        assert_eq!(form.mines_left(), 79);
    }

    #[test]
    fn won_and_lost_read_differently() {
        use game::GameStatus::*;
        assert_ne!(status_text(Won), status_text(Lost));
        assert_ne!(status_class(Won), status_class(Lost));
        assert_eq!(status_class(InProgress), "in-progress");
    }

    #[test]
    fn placement_follows_args() {
        let props = FormProps {
            seed: None,
            placement: PlacementArg::Density,
            density: 30,
        };
        assert_eq!(props.placement(), game::Placement::Density(30));
        assert_eq!(FormProps::default().placement(), game::Placement::Exact);
    }

    #[test]
    fn settings_use_their_own_storage_key() {
        assert_eq!(<FormSettings as StorageKey>::KEY, "minefield:settings");
    }
}
