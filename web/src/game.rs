use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use vault_core as vault;
use yew::prelude::*;

/// How long a finished round stays on screen before the level end screen.
const REVEAL_DELAY_MS: u32 = 3_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    Intro,
    LevelIntro,
    Play,
    LevelEnd,
}

impl Screen {
    const fn next(self) -> Self {
        use Screen::*;
        match self {
            Intro => LevelIntro,
            LevelIntro => Play,
            Play => LevelEnd,
            LevelEnd => LevelIntro,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
}

/// The player's progress plus the round currently on the table.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    session: vault::Session,
    round: Option<vault::Round>,
}

impl GameSession {
    fn new(session: vault::Session) -> Self {
        Self {
            session,
            round: None,
        }
    }

    /// Replaces the round on the table. On error the table is left empty.
    fn prepare_round(&mut self, seed: u64) -> vault::Result<&vault::Round> {
        self.round = None;
        let round = self
            .session
            .start_round(vault::RandomPasswordGenerator::new(seed))?;
        Ok(self.round.insert(round))
    }

    fn turn_wheel(
        &mut self,
        part: usize,
        direction: Direction,
    ) -> Option<vault::Result<vault::Digit>> {
        let round = self.round.as_mut()?;
        Some(match direction {
            Direction::Up => round.increment(part),
            Direction::Down => round.decrement(part),
        })
    }

    fn check(&mut self) -> Option<vault::Result<vault::RoundState>> {
        let Self { session, round } = self;
        round
            .as_mut()
            .map(|round| round.evaluate_attempt(session))
    }

    /// Hands a finished round to the session and clears the table.
    fn finish_round(&mut self) -> Option<vault::Result<vault::Level>> {
        if !self.is_round_finished() {
            return self
                .round
                .as_ref()
                .map(|_| Err(vault::VaultError::RoundInProgress));
        }
        let round = self.round.take()?;
        Some(self.session.finish_round(round))
    }

    fn is_round_finished(&self) -> bool {
        self.round.as_ref().is_some_and(|round| round.is_finished())
    }
}

fn attempts_line(attempt_limit: vault::Attempts) -> String {
    format!("You have {} attempts to unlock the vault.", attempt_limit)
}

const fn duplicates_line(duplicates_allowed: bool) -> &'static str {
    if duplicates_allowed {
        "There may be repeated digits in the code."
    } else {
        "There are no repeated digits in the code."
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Next,
    Turn(usize, Direction),
    Check,
    Reveal,
}

#[derive(Properties, Clone, PartialEq)]
struct WheelProps {
    part: usize,
    digit: vault::Digit,
    #[prop_or_default]
    locked: bool,
    callback: Callback<(usize, Direction)>,
}

#[function_component(WheelView)]
fn wheel_component(props: &WheelProps) -> Html {
    let WheelProps {
        part,
        digit,
        locked,
        callback,
    } = props.clone();

    let onclick_up = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("wheel {} up", part);
            callback.emit((part, Direction::Up));
        })
    };

    let onclick_down = Callback::from(move |_: MouseEvent| {
        log::trace!("wheel {} down", part);
        callback.emit((part, Direction::Down));
    });

    html! {
        <div class={classes!("wheel", locked.then_some("locked"))}>
            <button class="up" disabled={locked} onclick={onclick_up}/>
            <span class="digit">{digit.get()}</span>
            <button class="down" disabled={locked} onclick={onclick_down}/>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct IndicatorProps {
    kind: &'static str,
    lit: u8,
    total: u8,
}

#[function_component(IndicatorView)]
fn indicator_component(props: &IndicatorProps) -> Html {
    html! {
        <div class={classes!("indicators", props.kind)}>
            {
                for (0..props.total).map(|i| html! {
                    <span class={classes!("light", (i < props.lit).then_some("on"))}/>
                })
            }
        </div>
    }
}

#[derive(Args, Properties, Debug, Default, Clone, PartialEq)]
pub(crate) struct VaultProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start at this level instead of the first one
    #[arg(short, long, value_parser = clap::value_parser!(vault::Level).range(1..))]
    level: Option<vault::Level>,
}

pub(crate) struct VaultView {
    screen: Screen,
    game: GameSession,
    seeds: SeedSource,
    _reveal_timeout: Option<Timeout>,
}

impl VaultView {
    fn enter_level_intro(&mut self) {
        let seed = self.seeds.next_seed();
        match self.game.prepare_round(seed) {
            Ok(round) => log::debug!("level {} ready, seed {}", round.level(), seed),
            Err(err) => log::error!("Could not prepare round: {}", err),
        }
        self.screen = Screen::LevelIntro;
    }

    fn next(&mut self) -> bool {
        use Screen::*;

        match self.screen {
            Intro => self.enter_level_intro(),
            LevelIntro if self.game.round.is_some() => self.screen = LevelIntro.next(),
            LevelIntro => {
                log::warn!("no round prepared, trying again");
                self.enter_level_intro();
            }
            Play => return false,
            LevelEnd => {
                match self.game.finish_round() {
                    Some(Ok(level)) => log::debug!("moving on to level {}", level),
                    Some(Err(err)) => log::warn!("Could not finish round: {}", err),
                    None => {}
                }
                self.enter_level_intro();
            }
        }
        true
    }

    fn check(&mut self, ctx: &Context<Self>) -> bool {
        if self.screen != Screen::Play {
            return false;
        }

        match self.game.check() {
            Some(Ok(state)) => {
                if state.status.is_finished() {
                    log::debug!("round over: {:?}", state.status);
                    let link = ctx.link().clone();
                    self._reveal_timeout = Some(Timeout::new(REVEAL_DELAY_MS, move || {
                        link.send_message(Msg::Reveal)
                    }));
                }
                true
            }
            Some(Err(err)) => {
                log::warn!("check ignored: {}", err);
                false
            }
            None => false,
        }
    }

    fn view_intro(&self, ctx: &Context<Self>) -> Html {
        html! {
            <section class="intro">
                <h1>{"Vault"}</h1>
                <p>{"Crack the code to open the vault."}</p>
                <p>{"Turn the wheels to pick a digit for each part of the code, then press Check."}</p>
                <p>{"The top lights show how many digits are correct, the bottom lights how many are also in the right place."}</p>
                {self.view_next_button(ctx)}
            </section>
        }
    }

    fn view_level_intro(&self, ctx: &Context<Self>) -> Html {
        let level = self.game.session.level();
        html! {
            <section class="level-intro">
                <h2>{format!("Level {}", level)}</h2>
                {
                    for self.game.round.as_ref().map(|round| {
                        let config = round.config();
                        html! {
                            <>
                                <p>{attempts_line(config.attempt_limit)}</p>
                                <p>{duplicates_line(config.duplicates_allowed)}</p>
                            </>
                        }
                    })
                }
                {self.view_next_button(ctx)}
            </section>
        }
    }

    fn view_play(&self, ctx: &Context<Self>) -> Html {
        let Some(round) = self.game.round.as_ref() else {
            return html! {};
        };
        let locked = round.is_finished();
        let state = round.state();
        let parts = round.config().parts;
        let cb_turn = ctx
            .link()
            .callback(|(part, direction): (usize, Direction)| Msg::Turn(part, direction));
        let cb_check = ctx.link().callback(|_: MouseEvent| Msg::Check);

        html! {
            <section class={classes!("play", state.is_solved().then_some("solved"), state.is_failed().then_some("failed"))}>
                <h2>{format!("Level {}", round.level())}</h2>
                <div class="wheels">
                    {
                        for round.guess().iter().enumerate().map(|(part, digit)| {
                            let callback = cb_turn.clone();
                            html! {
                                <WheelView {part} {digit} {locked} {callback}/>
                            }
                        })
                    }
                </div>
                <button class="check" disabled={locked} onclick={cb_check}>{"Check"}</button>
                <IndicatorView kind="correct" lit={state.correct_count} total={parts}/>
                <IndicatorView kind="in-place" lit={state.in_place_count} total={parts}/>
                <aside class="attempts">{round.attempts_remaining()}</aside>
            </section>
        }
    }

    fn view_level_end(&self, ctx: &Context<Self>) -> Html {
        let Some(round) = self.game.round.as_ref() else {
            return html! {};
        };
        let state = round.state();

        html! {
            <section class="level-end">
                <h2>{format!("Level {}", round.level())}</h2>
                if state.is_failed() {
                    <>
                        <p>{"You failed to crack the code:"}</p>
                        <p class="code">{round.password().to_string()}</p>
                    </>
                } else {
                    <>
                        <p>{"You cracked the code and opened the vault."}</p>
                        <p>{"Well done!"}</p>
                        <p>{format!("Score for this round = {}", state.score)}</p>
                    </>
                }
                <p>{format!("Total score = {}", self.game.session.total_score())}</p>
                {self.view_next_button(ctx)}
            </section>
        }
    }

    fn view_next_button(&self, ctx: &Context<Self>) -> Html {
        let cb_next = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Next
        });
        html! {
            <button class="next" onclick={cb_next}>{"Next"}</button>
        }
    }
}

impl Component for VaultView {
    type Message = Msg;
    type Properties = VaultProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let session = props
            .level
            .map_or(Ok(vault::Session::new()), vault::Session::at_level)
            .unwrap_or_else(|err| {
                log::warn!("Ignoring start level: {}", err);
                vault::Session::new()
            });

        Self {
            screen: Screen::Intro,
            game: GameSession::new(session),
            seeds: SeedSource::new(props.seed),
            _reveal_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Next => self.next(),
            Turn(part, direction) if self.screen == Screen::Play => {
                match self.game.turn_wheel(part, direction) {
                    Some(Ok(_)) => true,
                    Some(Err(err)) => {
                        log::warn!("wheel {} not turned: {}", part, err);
                        false
                    }
                    None => false,
                }
            }
            Turn(..) => false,
            Check => self.check(ctx),
            Reveal => {
                self._reveal_timeout = None;
                if self.screen == Screen::Play && self.game.is_round_finished() {
                    self.screen = Screen::Play.next();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Screen::*;

        html! {
            <div class="vault">
                {
                    match self.screen {
                        Intro => self.view_intro(ctx),
                        LevelIntro => self.view_level_intro(ctx),
                        Play => self.view_play(ctx),
                        LevelEnd => self.view_level_end(ctx),
                    }
                }
            </div>
        }
    }
}
