// State
//
// Intent: let an object change its behaviour when its internal state
// changes, as if it had changed its type.
//
// States consume themselves (`self: Box<Self>`) and return the next state,
// so a stale state object can never be used after a transition.

use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

pub trait State {
    fn name(&self) -> &'static str;
    fn handle1(self: Box<Self>, log: &mut Vec<String>) -> Box<dyn State>;
    fn handle2(self: Box<Self>, log: &mut Vec<String>) -> Box<dyn State>;
}

pub struct ConcreteStateA;
pub struct ConcreteStateB;

impl State for ConcreteStateA {
    fn name(&self) -> &'static str {
        "ConcreteStateA"
    }

    fn handle1(self: Box<Self>, log: &mut Vec<String>) -> Box<dyn State> {
        log.push("ConcreteStateA handles request1.".to_string());
        log.push("ConcreteStateA wants to change the state of the context.".to_string());
        Box::new(ConcreteStateB)
    }

    fn handle2(self: Box<Self>, log: &mut Vec<String>) -> Box<dyn State> {
        log.push("ConcreteStateA handles request2.".to_string());
        self
    }
}

impl State for ConcreteStateB {
    fn name(&self) -> &'static str {
        "ConcreteStateB"
    }

    fn handle1(self: Box<Self>, log: &mut Vec<String>) -> Box<dyn State> {
        log.push("ConcreteStateB handles request1.".to_string());
        self
    }

    fn handle2(self: Box<Self>, log: &mut Vec<String>) -> Box<dyn State> {
        log.push("ConcreteStateB handles request2.".to_string());
        log.push("ConcreteStateB wants to change the state of the context.".to_string());
        Box::new(ConcreteStateA)
    }
}

pub struct Context {
    state: Option<Box<dyn State>>,
    log: Vec<String>,
}

impl Context {
    pub fn new(state: Box<dyn State>) -> Self {
        let log = vec![format!("Context: Transition to {}.", state.name())];
        Self {
            state: Some(state),
            log,
        }
    }

    /// Logs only when the state actually changed.
    fn transition(&mut self, from: &'static str, next: Box<dyn State>) {
        let to = next.name();
        if to != from {
            self.log.push(format!("Context: Transition to {}.", to));
            debug!(from, to, "context transition");
        }
        self.state = Some(next);
    }

    pub fn state_name(&self) -> &'static str {
        self.state.as_ref().map_or("none", |s| s.name())
    }

    pub fn request1(&mut self) {
        if let Some(state) = self.state.take() {
            let from = state.name();
            let next = state.handle1(&mut self.log);
            self.transition(from, next);
        }
    }

    pub fn request2(&mut self) {
        if let Some(state) = self.state.take() {
            let from = state.name();
            let next = state.handle2(&mut self.log);
            self.transition(from, next);
        }
    }

    /// Everything that happened so far.
    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

pub fn conceptual_demo() -> Transcript {
    let mut context = Context::new(Box::new(ConcreteStateA));
    context.request1();
    context.request2();

    let mut out = Transcript::new();
    out.lines(context.take_log());
    out
}

// ============================================================================
// Real-world example: audio player
// ============================================================================

/// The part of the player that states act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playback {
    playlist: Vec<String>,
    current: usize,
    playing: bool,
}

impl Playback {
    pub fn current_song(&self) -> Option<&str> {
        self.playlist.get(self.current).map(String::as_str)
    }

    fn start(&mut self) -> String {
        self.playing = true;
        format!("Playing {}", self.current_song().unwrap_or("nothing"))
    }

    fn stop(&mut self) -> String {
        self.playing = false;
        "Paused".to_string()
    }

    fn next_song(&mut self) -> String {
        if !self.playlist.is_empty() {
            self.current = (self.current + 1) % self.playlist.len();
        }
        format!("Next song: {}", self.current_song().unwrap_or("nothing"))
    }

    fn previous_song(&mut self) -> String {
        if !self.playlist.is_empty() {
            self.current = (self.current + self.playlist.len() - 1) % self.playlist.len();
        }
        format!("Previous song: {}", self.current_song().unwrap_or("nothing"))
    }
}

type Transition = (Box<dyn PlayerState>, String);

pub trait PlayerState {
    fn name(&self) -> &'static str;
    fn click_lock(self: Box<Self>, playback: &mut Playback) -> Transition;
    fn click_play(self: Box<Self>, playback: &mut Playback) -> Transition;
    fn click_next(self: Box<Self>, playback: &mut Playback) -> Transition;
    fn click_previous(self: Box<Self>, playback: &mut Playback) -> Transition;
}

pub struct ReadyState;
pub struct PlayingState;
pub struct LockedState;

impl PlayerState for ReadyState {
    fn name(&self) -> &'static str {
        "Ready"
    }

    fn click_lock(self: Box<Self>, _playback: &mut Playback) -> Transition {
        (Box::new(LockedState), "Locked".to_string())
    }

    fn click_play(self: Box<Self>, playback: &mut Playback) -> Transition {
        let line = playback.start();
        (Box::new(PlayingState), line)
    }

    fn click_next(self: Box<Self>, playback: &mut Playback) -> Transition {
        let line = playback.next_song();
        (self, line)
    }

    fn click_previous(self: Box<Self>, playback: &mut Playback) -> Transition {
        let line = playback.previous_song();
        (self, line)
    }
}

impl PlayerState for PlayingState {
    fn name(&self) -> &'static str {
        "Playing"
    }

    /// Locking keeps the music going.
    fn click_lock(self: Box<Self>, _playback: &mut Playback) -> Transition {
        (Box::new(LockedState), "Locked".to_string())
    }

    fn click_play(self: Box<Self>, playback: &mut Playback) -> Transition {
        let line = playback.stop();
        (Box::new(ReadyState), line)
    }

    fn click_next(self: Box<Self>, playback: &mut Playback) -> Transition {
        let line = playback.next_song();
        (self, line)
    }

    fn click_previous(self: Box<Self>, playback: &mut Playback) -> Transition {
        let line = playback.previous_song();
        (self, line)
    }
}

impl PlayerState for LockedState {
    fn name(&self) -> &'static str {
        "Locked"
    }

    fn click_lock(self: Box<Self>, playback: &mut Playback) -> Transition {
        if playback.playing {
            (Box::new(PlayingState), "Unlocked".to_string())
        } else {
            (Box::new(ReadyState), "Unlocked".to_string())
        }
    }

    fn click_play(self: Box<Self>, _playback: &mut Playback) -> Transition {
        (self, "Locked: ignored".to_string())
    }

    fn click_next(self: Box<Self>, _playback: &mut Playback) -> Transition {
        (self, "Locked: ignored".to_string())
    }

    fn click_previous(self: Box<Self>, _playback: &mut Playback) -> Transition {
        (self, "Locked: ignored".to_string())
    }
}

pub struct AudioPlayer {
    state: Option<Box<dyn PlayerState>>,
    playback: Playback,
}

impl AudioPlayer {
    pub fn new(playlist: Vec<String>) -> Self {
        Self {
            state: Some(Box::new(ReadyState)),
            playback: Playback {
                playlist,
                current: 0,
                playing: false,
            },
        }
    }

    fn apply(&mut self, click: fn(Box<dyn PlayerState>, &mut Playback) -> Transition) -> String {
        let Some(state) = self.state.take() else {
            return String::new();
        };
        let from = state.name();
        let (next, line) = click(state, &mut self.playback);
        if next.name() != from {
            debug!(from, to = next.name(), "player state change");
        }
        self.state = Some(next);
        line
    }

    pub fn click_lock(&mut self) -> String {
        self.apply(|s, p| s.click_lock(p))
    }

    pub fn click_play(&mut self) -> String {
        self.apply(|s, p| s.click_play(p))
    }

    pub fn click_next(&mut self) -> String {
        self.apply(|s, p| s.click_next(p))
    }

    pub fn click_previous(&mut self) -> String {
        self.apply(|s, p| s.click_previous(p))
    }

    pub fn state_name(&self) -> &'static str {
        self.state.as_ref().map_or("none", |s| s.name())
    }

    pub fn is_playing(&self) -> bool {
        self.playback.playing
    }

    pub fn current_song(&self) -> Option<&str> {
        self.playback.current_song()
    }
}

pub fn real_world_demo() -> Transcript {
    let mut player = AudioPlayer::new(vec![
        "Song 1".to_string(),
        "Song 2".to_string(),
        "Song 3".to_string(),
    ]);

    let mut out = Transcript::new();
    out.line(format!("Initial state: {}", player.state_name()));
    let steps: [(&str, fn(&mut AudioPlayer) -> String); 5] = [
        ("Play", AudioPlayer::click_play),
        ("Lock", AudioPlayer::click_lock),
        ("Play", AudioPlayer::click_play),
        ("Lock", AudioPlayer::click_lock),
        ("Next", AudioPlayer::click_next),
    ];
    for (label, click) in steps {
        let result = click(&mut player);
        out.line(format!(
            "Clicked {}: {} [state: {}]",
            label,
            result,
            player.state_name()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> AudioPlayer {
        AudioPlayer::new(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    }

    #[test]
    fn test_context_transitions() {
        let mut context = Context::new(Box::new(ConcreteStateA));
        assert_eq!(context.state_name(), "ConcreteStateA");

        context.request1();
        assert_eq!(context.state_name(), "ConcreteStateB");
        context.request1();
        assert_eq!(context.state_name(), "ConcreteStateB");

        context.request2();
        assert_eq!(context.state_name(), "ConcreteStateA");

        let log = context.take_log();
        assert_eq!(log[0], "Context: Transition to ConcreteStateA.");
        assert_eq!(log.iter().filter(|l| l.starts_with("Context:")).count(), 3);
    }

    #[test]
    fn test_self_loop_does_not_log_a_transition() {
        let mut context = Context::new(Box::new(ConcreteStateB));
        context.take_log();

        context.request1();
        assert_eq!(context.take_log(), vec!["ConcreteStateB handles request1."]);

        context.request2();
        assert_eq!(
            context.take_log(),
            vec![
                "ConcreteStateB handles request2.",
                "ConcreteStateB wants to change the state of the context.",
                "Context: Transition to ConcreteStateA.",
            ]
        );
    }

    #[test]
    fn test_play_pause() {
        let mut player = player();
        assert_eq!(player.click_play(), "Playing a");
        assert!(player.is_playing());
        assert_eq!(player.state_name(), "Playing");

        player.click_play();
        assert!(!player.is_playing());
        assert_eq!(player.state_name(), "Ready");
    }

    #[test]
    fn test_locked_ignores_everything_but_lock() {
        let mut player = player();
        player.click_play();
        player.click_lock();
        assert_eq!(player.state_name(), "Locked");
        assert!(player.is_playing());

        assert_eq!(player.click_play(), "Locked: ignored");
        assert_eq!(player.click_next(), "Locked: ignored");
        assert_eq!(player.current_song(), Some("a"));
        assert!(player.is_playing());

        player.click_lock();
        assert_eq!(player.state_name(), "Playing");
        assert!(player.is_playing());
    }

    #[test]
    fn test_unlock_when_stopped_returns_to_ready() {
        let mut player = player();
        player.click_lock();
        assert!(!player.is_playing());
        assert_eq!(player.click_lock(), "Unlocked");
        assert_eq!(player.state_name(), "Ready");
    }

    #[test]
    fn test_playlist_wraps() {
        let mut player = player();
        assert_eq!(player.click_previous(), "Previous song: c");
        player.click_next();
        assert_eq!(player.click_next(), "Next song: b");
    }

    #[test]
    fn test_empty_playlist() {
        let mut player = AudioPlayer::new(Vec::new());
        assert_eq!(player.click_next(), "Next song: nothing");
        assert_eq!(player.click_play(), "Playing nothing");
    }
}
