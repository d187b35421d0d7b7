//! The app: one session, one memory board, one quiz and one story pane,
//! driven by [`UserAction`]s.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use arca_content::{ContentProvider, ContentService, HttpContentProvider, PromptTemplates};
use arca_core::config::ArcaConfig;
use arca_core::memory_game::{Difficulty, FlipOutcome, GameEvent, MemoryGame, Phase, ThemeId};
use arca_core::quiz::{self, QuizFlow, QuizState};
use arca_core::session::AppSession;
use arca_core::types::{AppView, StoryResponse};

use crate::events::{ShellEvent, UserAction};
use crate::hooks;

/// Message shown when the provider could not produce a story.
pub const STORY_FAILED_MESSAGE: &str =
    "Ops! Tivemos um probleminha para encontrar essa história. Tente outra!";

/// State of the story screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoryState {
    /// Waiting for a topic.
    #[default]
    Idle,
    /// Request in flight.
    Loading {
        /// Requested topic.
        topic: String,
    },
    /// Story on screen.
    Ready(StoryResponse),
    /// Last request failed.
    Failed {
        /// Player-facing message.
        message: String,
    },
}

/// Routes user actions into the engines and applies profile hooks.
pub struct App<P> {
    session: AppSession,
    memory: MemoryGame,
    quiz: QuizFlow,
    story: StoryState,
    content: ContentService<P>,
}

impl App<HttpContentProvider> {
    /// Build the app with the HTTP provider described by `config`.
    ///
    /// A missing credential or unknown provider is logged and the app runs
    /// with no provider, so stories and quizzes fail with a retry prompt
    /// while the memory game keeps working.
    #[must_use]
    pub fn from_config(config: &ArcaConfig) -> Self {
        let provider = HttpContentProvider::from_config(&config.content).unwrap_or_else(|e| {
            warn!(error = %e, "Content provider disabled");
            HttpContentProvider::none()
        });

        let prompts = match config.content.prompts_file.as_deref() {
            Some(path) => PromptTemplates::from_file(path).unwrap_or_else(|e| {
                warn!(error = %e, "Prompt overrides ignored");
                PromptTemplates::builtin()
            }),
            None => PromptTemplates::builtin(),
        };

        let content = ContentService::from_config(provider, &config.content).with_prompts(prompts);
        Self::new(config, content)
    }

    /// Load `arca.toml` (or use defaults if `path` is `None`) and build the app.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_config_file(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => ArcaConfig::from_file(path)?,
            None => ArcaConfig::default(),
        };
        Ok(Self::from_config(&config))
    }
}

impl<P: ContentProvider> App<P> {
    /// Build the app around an existing content service.
    #[must_use]
    pub fn new(config: &ArcaConfig, content: ContentService<P>) -> Self {
        Self {
            session: AppSession::new(&config.session),
            memory: MemoryGame::new(config.memory_game.clone()),
            quiz: QuizFlow::new(),
            story: StoryState::Idle,
            content,
        }
    }

    /// Apply one user action.
    ///
    /// Content requests are awaited here; everything else is immediate.
    pub async fn handle(&mut self, action: UserAction) -> Vec<ShellEvent> {
        debug!(?action, "Handling action");
        match action {
            UserAction::Navigate(view) => self.navigate(view).into_iter().collect(),
            UserAction::StartMemoryGame { theme, difficulty } => self.start_memory_game(theme, difficulty),
            UserAction::RestartMemoryGame => self.restart_memory_game(),
            UserAction::FlipCard(position) => self.flip(position),
            UserAction::RequestStory(topic) => self.request_story(&topic).await,
            UserAction::StartQuiz(topic) => self.start_quiz(&topic).await,
            UserAction::StartRandomQuiz => self.start_random_quiz().await,
            UserAction::AnswerQuiz(option) => self.answer_quiz(option),
            UserAction::NextQuestion => self.next_question(),
        }
    }

    /// Move the memory-game clock forward.
    ///
    /// Only runs while the memory-game screen is showing. A win credits the
    /// profile before returning.
    pub fn advance(&mut self, step: Duration) -> Vec<ShellEvent> {
        if self.session.current_view() != AppView::MemoryGame {
            return Vec::new();
        }

        let mut events = Vec::new();
        for event in self.memory.advance(step) {
            let credit = match &event {
                GameEvent::Won(victory) => hooks::on_memory_game_won(&mut self.session, victory),
                _ => Vec::new(),
            };
            events.push(ShellEvent::Game(event));
            events.extend(credit);
        }
        events
    }

    /// One second of memory-game time.
    pub fn tick(&mut self) -> Vec<ShellEvent> {
        self.advance(Duration::from_secs(1))
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn navigate(&mut self, to: AppView) -> Option<ShellEvent> {
        let from = self.session.current_view();
        if from == to {
            return None;
        }

        if from == AppView::MemoryGame {
            self.memory.exit();
        }
        match to {
            AppView::Quiz => self.quiz.reset(),
            AppView::Story => self.story = StoryState::Idle,
            _ => {}
        }

        self.session.set_view(to);
        Some(ShellEvent::ViewChanged { from, to })
    }

    // -----------------------------------------------------------------------
    // Memory game
    // -----------------------------------------------------------------------

    fn start_memory_game(&mut self, theme: ThemeId, difficulty: Difficulty) -> Vec<ShellEvent> {
        let mut events: Vec<ShellEvent> = self.navigate(AppView::MemoryGame).into_iter().collect();
        let dealt = self.memory.start_game(theme, difficulty);
        events.push(self.deal_outcome(dealt));
        events
    }

    fn restart_memory_game(&mut self) -> Vec<ShellEvent> {
        if self.session.current_view() != AppView::MemoryGame || self.memory.phase() == Phase::Idle {
            return Vec::new();
        }
        let dealt = self.memory.restart();
        vec![self.deal_outcome(dealt)]
    }

    fn deal_outcome(&self, dealt: arca_core::error::Result<()>) -> ShellEvent {
        match dealt {
            Ok(()) => ShellEvent::GameStarted {
                theme: self.memory.theme().id,
                difficulty: self.memory.difficulty(),
                cards: self.memory.cards().len(),
            },
            Err(e) => {
                warn!(error = %e, "Could not deal memory board");
                ShellEvent::GameFailed { message: e.to_string() }
            }
        }
    }

    fn flip(&mut self, position: usize) -> Vec<ShellEvent> {
        if self.session.current_view() != AppView::MemoryGame {
            return Vec::new();
        }
        match self.memory.flip(position) {
            FlipOutcome::Ignored => Vec::new(),
            outcome => vec![ShellEvent::CardFlipped { position, outcome }],
        }
    }

    // -----------------------------------------------------------------------
    // Stories
    // -----------------------------------------------------------------------

    async fn request_story(&mut self, topic: &str) -> Vec<ShellEvent> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Vec::new();
        }

        let mut events: Vec<ShellEvent> = self.navigate(AppView::Story).into_iter().collect();
        self.story = StoryState::Loading { topic: topic.to_string() };
        events.push(ShellEvent::StoryLoading { topic: topic.to_string() });

        match self.content.request_story(topic).await {
            Ok(story) => {
                hooks::on_story_delivered(&mut self.session);
                self.story = StoryState::Ready(story.clone());
                events.push(ShellEvent::StoryReady(story));
            }
            Err(e) => {
                debug!(kind = %e.kind, source = %e.source, "Story request failed");
                let message = STORY_FAILED_MESSAGE.to_string();
                self.story = StoryState::Failed { message: message.clone() };
                events.push(ShellEvent::StoryFailed { message });
            }
        }
        events
    }

    // -----------------------------------------------------------------------
    // Quiz
    // -----------------------------------------------------------------------

    async fn start_quiz(&mut self, topic: &str) -> Vec<ShellEvent> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Vec::new();
        }

        let mut events: Vec<ShellEvent> = self.navigate(AppView::Quiz).into_iter().collect();
        let topic = self.quiz.begin(topic);
        events.push(ShellEvent::QuizLoading { topic: topic.clone() });

        match self.content.request_quiz(&topic).await {
            Ok(data) => {
                self.quiz.deliver(data);
                events.extend(self.quiz_position());
            }
            Err(e) => {
                debug!(kind = %e.kind, source = %e.source, "Quiz request failed");
                self.quiz.fail();
                let message = self.quiz.last_error().unwrap_or_default().to_string();
                events.push(ShellEvent::QuizFailed { message });
            }
        }
        events
    }

    async fn start_random_quiz(&mut self) -> Vec<ShellEvent> {
        let topic = quiz::random_topic(&mut rand::thread_rng());
        self.start_quiz(topic).await
    }

    fn answer_quiz(&mut self, option: usize) -> Vec<ShellEvent> {
        let Some(correct) = self.quiz.answer(option) else {
            return Vec::new();
        };
        let Some(question) = self.quiz.current_question() else {
            return Vec::new();
        };
        vec![ShellEvent::QuizAnswered {
            correct,
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone(),
        }]
    }

    fn next_question(&mut self) -> Vec<ShellEvent> {
        if !self.quiz.next() {
            return Vec::new();
        }
        let events: Vec<ShellEvent> = self.quiz_position().into_iter().collect();
        if let QuizState::Finished { score, total } = self.quiz.state() {
            info!(score, total, "Quiz finished");
        }
        events
    }

    fn quiz_position(&self) -> Option<ShellEvent> {
        match *self.quiz.state() {
            QuizState::Answering { index } => Some(ShellEvent::QuizQuestion {
                number: index + 1,
                total: self.quiz.total(),
            }),
            QuizState::Finished { score, total } => Some(ShellEvent::QuizFinished { score, total }),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// View selection and profile.
    #[must_use]
    pub fn session(&self) -> &AppSession {
        &self.session
    }

    /// The memory board.
    #[must_use]
    pub fn memory_game(&self) -> &MemoryGame {
        &self.memory
    }

    /// The quiz.
    #[must_use]
    pub fn quiz(&self) -> &QuizFlow {
        &self.quiz
    }

    /// The story screen.
    #[must_use]
    pub fn story(&self) -> &StoryState {
        &self.story
    }

    /// The content service.
    #[must_use]
    pub fn content(&self) -> &ContentService<P> {
        &self.content
    }
}
