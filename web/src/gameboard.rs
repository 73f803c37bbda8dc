use crate::utils::*;
use chrono::prelude::*;
use gloo::timers::callback::Interval;
use minefield_core as game;
use yew::prelude::*;

const FLAG_IMAGE: &str = "/assets/flag.png";

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// What a single block looks like, including the end-of-game reveal.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewBlockState {
    Shielded,
    Flagged,
    Revealed(u8),
    TriggeredMine,
    Mine,
    Misflagged,
}

/// Checkerboard shading of the board.
#[derive(Copy, Clone, Debug, PartialEq)]
enum BlockShade {
    One,
    Two,
}

impl BlockShade {
    fn at(pos: game::BlockPos) -> Self {
        if (u16::from(pos.x) + u16::from(pos.y)) % 2 == 0 {
            Self::One
        } else {
            Self::Two
        }
    }

    const fn block_class(self) -> &'static str {
        match self {
            Self::One => "block-style-one",
            Self::Two => "block-style-two",
        }
    }

    const fn empty_class(self) -> &'static str {
        match self {
            Self::One => "empty-style-one",
            Self::Two => "empty-style-two",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub game: game::Game,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    fn new(game: game::Game) -> Self {
        Self {
            game,
            started_at: None,
            ended_at: None,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.game.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }

    /// Toggles the flag on the block behind a block or flag-marker DOM id, returning the
    /// change in placed flags.
    fn flag_element(&mut self, element_id: &str) -> i32 {
        let pos = match game::BlockPos::from_element_id(element_id) {
            Ok(pos) => pos,
            Err(_) => {
                log::trace!("right click outside a block: {:?}", element_id);
                return 0;
            }
        };

        match self.game.toggle_flag(pos) {
            Ok(outcome) => outcome.flag_delta(),
            Err(err) => {
                log::debug!("flag {:?} ignored: {}", pos, err);
                0
            }
        }
    }

    fn block_state_at(&self, block: &game::Block) -> ViewBlockState {
        use game::BlockStatus::*;
        use game::GameStatus::*;

        match (self.game.status(), block.status) {
            (Lost, _) if self.game.triggered_mine() == Some(block.pos) => {
                ViewBlockState::TriggeredMine
            }
            (Lost | Won, status) if status.is_flagged() && !block.is_mine => {
                ViewBlockState::Misflagged
            }
            (Lost, Shielded) if block.is_mine => ViewBlockState::Mine,
            (Won, Shielded) if block.is_mine => ViewBlockState::Flagged,
            (_, Shielded) => ViewBlockState::Shielded,
            (_, Flagged) => ViewBlockState::Flagged,
            (_, Revealed(count)) => ViewBlockState::Revealed(count),
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct BlockProps {
    pos: game::BlockPos,
    block_state: ViewBlockState,
    #[prop_or_default]
    locked: bool,
    onreveal: Callback<game::BlockPos>,
}

#[function_component(BlockView)]
fn block_component(props: &BlockProps) -> Html {
    use ViewBlockState::*;

    let BlockProps {
        pos,
        block_state,
        locked,
        onreveal,
    } = props.clone();
    let shade = BlockShade::at(pos);

    let mut class = classes!(
        "block",
        shade.block_class(),
        match block_state {
            Shielded => classes!(),
            Revealed(_) => classes!(shade.empty_class()),
            Flagged => classes!("flagged"),
            TriggeredMine => classes!("mine", "exploded"),
            Mine => classes!("mine"),
            Misflagged => classes!("flagged", "wrong"),
        }
    );
    if locked {
        class.push("locked");
    }

    let content = match block_state {
        Flagged | Misflagged => html! {
            <img class="flag" id={pos.flag_element_id()} src={FLAG_IMAGE}/>
        },
        Revealed(count) if count > 0 => html! {
            <p class="number">{count.to_string()}</p>
        },
        _ => html! {},
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", pos.x, pos.y);
        onreveal.emit(pos);
    });

    html! {
        <div id={pos.element_id()} {class} {onclick}>{content}</div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameboardProps {
    pub config: game::GameConfig,
    pub placement: game::Placement,
    /// Forced seed, a random one is drawn per game otherwise
    #[prop_or_default]
    pub seed: Option<u64>,
    /// Bumped by the owner to request a fresh board
    pub generation: u32,
    /// Mines actually placed on each new board
    pub on_minefield_created: Callback<game::CellCount>,
    pub on_flag_count_change: Callback<i32>,
    pub on_game_status_change: Callback<game::GameStatus>,
}

pub(crate) enum Msg {
    Reveal(game::BlockPos),
    /// Right click on the board, carrying the DOM id of the clicked element
    Flag(String),
    UpdateTime,
}

pub(crate) struct Gameboard {
    session: GameSession,
    prev_time: u32,
    _timer_interval: Interval,
}

impl Gameboard {
    fn create_minefield(props: &GameboardProps) -> GameSession {
        let GameboardProps {
            config,
            placement,
            seed,
            generation,
            ..
        } = *props;
        let seed = seed.map_or_else(js_random_seed, |seed| {
            seed.wrapping_add(u64::from(generation))
        });
        log::debug!("new minefield, generation {} seed {}", generation, seed);

        let game = game::Game::create_minefield(generation, config, placement, seed)
            .unwrap_or_else(|err| {
                log::warn!("{}: {:?}, clamping", err, config);
                let config = game::GameConfig::new(config.height, config.width, config.mines);
                game::Game::new(generation, &placement.generate(seed, config))
            });

        props.on_minefield_created.emit(game.num_of_mines());
        props.on_game_status_change.emit(game.status());
        GameSession::new(game)
    }

    fn reveal_block(&mut self, ctx: &Context<Self>, pos: game::BlockPos) -> bool {
        use game::RevealOutcome::*;

        let prev_status = self.session.game.status();
        let outcome = match self.session.game.reveal(pos) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("reveal {:?} ignored: {}", pos, err);
                return false;
            }
        };

        if !outcome.has_update() {
            return false;
        }

        self.session.on_successful_move(utc_now());
        match outcome {
            HitMine => log::info!("mine hit at {:?}", pos),
            Won => log::info!("all safe blocks revealed"),
            NoChange | Revealed(_) => {}
        }

        let status = self.session.game.status();
        if status != prev_status {
            ctx.props().on_game_status_change.emit(status);
        }
        true
    }

    fn flag_block(&mut self, ctx: &Context<Self>, element_id: &str) -> bool {
        match self.session.flag_element(element_id) {
            0 => false,
            delta => {
                ctx.props().on_flag_count_change.emit(delta);
                true
            }
        }
    }

    fn get_time(&self) -> u32 {
        self.session.elapsed_secs(utc_now())
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }
}

impl Component for Gameboard {
    type Message = Msg;
    type Properties = GameboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: Self::create_minefield(ctx.props()),
            prev_time: 0,
            _timer_interval: Self::create_timer(ctx),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.generation != old_props.generation
            || props.config != old_props.config
            || props.placement != old_props.placement
        {
            self.session = Self::create_minefield(props);
            self.prev_time = 0;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Reveal(pos) => self.reveal_block(ctx, pos),
            Flag(element_id) => self.flag_block(ctx, &element_id),
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let game = &self.session.game;
        let locked = game.is_finished();
        let mines_left = format_for_counter(game.mines_left());
        let elapsed_time = format_for_counter(self.get_time() as i32);
        let onreveal = ctx.link().callback(Msg::Reveal);

        let oncontextmenu = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            let element_id = e
                .target_dyn_into::<web_sys::Element>()
                .map(|element| element.id())
                .unwrap_or_default();
            Msg::Flag(element_id)
        });

        let blocks: Vec<_> = game.blocks().collect();
        let rows = blocks.chunks(usize::from(game.width().max(1)));

        html! {
            <div class="gameboard">
                <nav>
                    <aside class="mines-left">{mines_left}</aside>
                    <aside class="timer">{elapsed_time}</aside>
                </nav>
                <div id="gameContainer" {oncontextmenu}>
                    {
                        for rows.map(|row| html! {
                            <div class="row">
                                {
                                    for row.iter().map(|&block| {
                                        let pos = block.pos;
                                        let block_state = self.session.block_state_at(block);
                                        let onreveal = onreveal.clone();
                                        html! {
                                            <BlockView key={block.id} {pos} {block_state} {locked} {onreveal}/>
                                        }
                                    })
                                }
                            </div>
                        })
                    }
                </div>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::BlockPos;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn session(size: (game::Coord, game::Coord), mines: &[BlockPos]) -> GameSession {
        let layout = game::MineLayout::from_mine_positions(size, mines).unwrap();
        GameSession::new(game::Game::new(1, &layout))
    }

    fn state_at(session: &GameSession, pos: BlockPos) -> ViewBlockState {
        session.block_state_at(session.game.block_at(pos).unwrap())
    }

    #[test]
    fn shading_is_a_checkerboard() {
        assert_eq!(BlockShade::at(BlockPos::new(1, 1)), BlockShade::One);
        assert_eq!(BlockShade::at(BlockPos::new(2, 1)), BlockShade::Two);
        assert_eq!(BlockShade::at(BlockPos::new(1, 2)), BlockShade::Two);
        assert_eq!(BlockShade::at(BlockPos::new(2, 2)), BlockShade::One);
    }

    #[test]
    fn lost_board_maps_triggered_mine_mine_and_misflagged() {
        let mines = [BlockPos::new(1, 1), BlockPos::new(1, 2)];
        let mut session = session((2, 2), &mines);

        session.game.toggle_flag(BlockPos::new(2, 1)).unwrap();
        assert_eq!(state_at(&session, BlockPos::new(2, 1)), ViewBlockState::Flagged);

        assert_eq!(
            session.game.reveal(BlockPos::new(1, 1)).unwrap(),
            game::RevealOutcome::HitMine
        );
        assert_eq!(
            state_at(&session, BlockPos::new(1, 1)),
            ViewBlockState::TriggeredMine
        );
        assert_eq!(state_at(&session, BlockPos::new(1, 2)), ViewBlockState::Mine);
        assert_eq!(
            state_at(&session, BlockPos::new(2, 1)),
            ViewBlockState::Misflagged
        );
        assert_eq!(
            state_at(&session, BlockPos::new(2, 2)),
            ViewBlockState::Shielded
        );
    }

    #[test]
    fn won_board_shows_remaining_mines_as_flags() {
        let mut session = session((2, 1), &[BlockPos::new(1, 1)]);

        assert_eq!(
            session.game.reveal(BlockPos::new(2, 1)).unwrap(),
            game::RevealOutcome::Won
        );
        assert_eq!(state_at(&session, BlockPos::new(1, 1)), ViewBlockState::Flagged);
        assert_eq!(
            state_at(&session, BlockPos::new(2, 1)),
            ViewBlockState::Revealed(1)
        );
    }

    #[test]
    fn active_board_hides_mines() {
        let session = session((2, 1), &[BlockPos::new(1, 1)]);
        assert_eq!(
            state_at(&session, BlockPos::new(1, 1)),
            ViewBlockState::Shielded
        );
    }

    #[test]
    fn flag_marker_id_unflags_its_block() {
        let mut session = session((2, 2), &[BlockPos::new(1, 1)]);
        let pos = BlockPos::new(2, 2);

        assert_eq!(session.flag_element(&pos.element_id()), 1);
        assert_eq!(state_at(&session, pos), ViewBlockState::Flagged);

        assert_eq!(session.flag_element(&pos.flag_element_id()), -1);
        assert_eq!(state_at(&session, pos), ViewBlockState::Shielded);
        assert_eq!(session.game.flagged_count(), 0);
    }

    #[test]
    fn right_click_off_a_block_or_on_a_revealed_block_changes_nothing() {
        let mut session = session((3, 1), &[BlockPos::new(1, 1)]);

        assert_eq!(session.flag_element("gameContainer"), 0);
        assert_eq!(session.flag_element(""), 0);

        session.game.reveal(BlockPos::new(3, 1)).unwrap();
        assert_eq!(session.flag_element("X3Y1"), 0);
        assert_eq!(session.game.flagged_count(), 0);
    }

    #[test]
    fn clock_runs_from_first_move_until_the_end() {
        let mut session = session((3, 1), &[BlockPos::new(1, 1)]);
        assert_eq!(session.elapsed_secs(t(100)), 0);

        session.game.reveal(BlockPos::new(3, 1)).unwrap();
        session.on_successful_move(t(10));
        assert_eq!(session.elapsed_secs(t(25)), 15);

        session.game.reveal(BlockPos::new(2, 1)).unwrap();
        session.on_successful_move(t(40));
        assert!(session.game.is_finished());
        assert_eq!(session.elapsed_secs(t(1000)), 30);
    }
}
