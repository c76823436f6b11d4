use anyhow::Result;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::config::AppConfig;
use crate::internal::notification::Notification;
use crate::utils::theme_loader::{Theme, ThemeMode, load_theme};

use ratatui::Frame;

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SwitchTheme,
    ClearNotification,
}

/// Application state for the greeting shell.
pub struct App {
    pub running: bool,
    pub theme: Theme,
    pub available_themes: Vec<(String, ThemeMode)>,
    pub current_theme_index: usize,
    #[allow(dead_code)]
    pub terminal_mode: ThemeMode,
    pub notification: Option<Notification>,
    pub config: AppConfig,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    #[tracing::instrument]
    pub fn new() -> Self {
        let config = AppConfig::load();
        let terminal_mode = Self::detect_terminal_mode();
        Self::with_config(config, terminal_mode)
    }

    /// Build the app from an explicit config and terminal mode. `new` wraps
    /// this with environment detection; tests and headless rendering call it
    /// directly so nothing depends on the ambient environment.
    pub fn with_config(config: AppConfig, terminal_mode: ThemeMode) -> Self {
        let start = std::time::Instant::now();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Discover available themes. Respect a configured `theme_file` if provided,
        // and fall back to common locations (./themes and themes next to the executable).
        let available_themes = Self::discover_all_themes(&config.theme_file);

        // Startup diagnostics (help debug initial theme selection)
        tracing::info!(
            "App config: theme_name='{}', theme_file='{}'",
            config.theme_name,
            config.theme_file
        );
        tracing::info!("Detected terminal_mode: {}", terminal_mode);
        tracing::info!("Discovered {} theme candidates:", available_themes.len());
        for (i, (path, mode)) in available_themes.iter().enumerate() {
            let stem = Path::new(path)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown");
            tracing::info!("  [{}] {} ({}) -> {}", i, stem, mode, path);
        }

        let (theme, current_theme_index) =
            Self::select_theme_from_config(&config, &available_themes, terminal_mode);

        // Log which theme was finally selected so startup behavior is traceable.
        match available_themes.get(current_theme_index) {
            Some((filename, mode)) => {
                let stem = Path::new(filename)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                tracing::info!(
                    "Selected theme index {} -> {} ({}) from '{}'",
                    current_theme_index,
                    stem,
                    mode,
                    filename
                );
            }
            None => {
                tracing::info!("No theme files found; using the built-in theme");
            }
        }

        tracing::info!(elapsed = ?start.elapsed(), "App initialized");

        Self {
            running: true,
            theme,
            available_themes,
            current_theme_index,
            terminal_mode,
            notification: None,
            config,
            action_tx,
            action_rx,
        }
    }

    /// Set an info notification
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::info(message));
    }

    /// Set a warning notification
    pub fn notify_warning(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::warning(message));
    }

    /// Set an error notification
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification::error(message));
    }

    /// Clear the current notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Short label for the active theme, shown in the top bar.
    pub fn theme_label(&self) -> String {
        match self.available_themes.get(self.current_theme_index) {
            Some((path, mode)) => {
                let stem = Path::new(path)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                format!("{} ({})", stem, mode)
            }
            None => "built-in".to_string(),
        }
    }

    /// Detect terminal background mode (light or dark)
    fn detect_terminal_mode() -> ThemeMode {
        // Check COLORFGBG environment variable (e.g., "15;0").
        // Usually "fg;bg". If bg is 0-6, it's likely dark. If 7-15, likely light.
        if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
            let parts: Vec<&str> = colorfgbg.split(';').collect();
            if parts.len() >= 2
                && let Ok(bg) = parts.last().unwrap().parse::<u8>()
            {
                match bg {
                    0..=6 => return ThemeMode::Dark,
                    _ => return ThemeMode::Light,
                }
            }
            return ThemeMode::Dark; // Default to dark if parsing fails but var exists
        }

        // Default to dark mode as it's more common for terminals
        ThemeMode::Dark
    }

    fn discover_all_themes(configured: &str) -> Vec<(String, ThemeMode)> {
        // Collect candidate theme locations in priority order:
        // 1. Explicit configured path (if non-empty)
        // 2. ./themes in current working directory
        // 3. <exe_dir>/themes (next to executable)
        let mut themes = Vec::new();
        let mut candidates: Vec<PathBuf> = Vec::new();

        // 1) Configured path (may be a file or directory)
        if !configured.trim().is_empty() {
            candidates.push(PathBuf::from(configured));
        }

        // 2) Current working directory ./themes
        candidates.push(PathBuf::from("./themes"));

        // 3) themes next to the executable (if available)
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("themes"));
        }

        // Walk candidates and gather .json theme files. Every file is offered
        // in both modes; loading falls back to the first variant it holds.
        for cand in candidates.into_iter() {
            if !cand.exists() {
                continue;
            }

            match (cand.is_file(), std::fs::read_dir(&cand)) {
                (true, _) => {
                    if let Some(ext) = cand.extension().and_then(|s| s.to_str())
                        && ext.eq_ignore_ascii_case("json")
                        && let Some(filename) = cand.to_str()
                    {
                        themes.push((filename.to_string(), ThemeMode::Dark));
                        themes.push((filename.to_string(), ThemeMode::Light));
                    }
                }
                (false, Ok(entries)) => {
                    for entry in entries.flatten() {
                        let path = entry.path();
                        if path.extension().and_then(|s| s.to_str()) == Some("json")
                            && let Some(filename) = path.to_str()
                        {
                            themes.push((filename.to_string(), ThemeMode::Dark));
                            themes.push((filename.to_string(), ThemeMode::Light));
                        }
                    }
                }
                _ => {}
            }
        }

        // Deduplicate entries reached through more than one candidate dir
        let mut seen = std::collections::HashSet::new();
        themes.retain(|(p, mode)| {
            let key = format!("{}:{}", p, mode);
            match seen.contains(&key) {
                true => false,
                false => {
                    seen.insert(key);
                    true
                }
            }
        });

        // read_dir order is filesystem-dependent; sort by path then mode so
        // the fallback entry and the switch cycle are stable across machines.
        themes.sort();

        themes
    }

    /// Centralized theme selection logic extracted from `new`.
    /// Returns (Theme, selected_index) for the given config and discovered themes.
    #[tracing::instrument(skip(config, available_themes))]
    pub fn select_theme_from_config(
        config: &AppConfig,
        available_themes: &[(String, ThemeMode)],
        terminal_mode: ThemeMode,
    ) -> (Theme, usize) {
        if available_themes.is_empty() {
            return (Theme::default(), 0);
        }

        // Canonicalize the configured theme name and detect an optional explicit
        // variant token, e.g. "default light" -> name="default", mode=Light.
        let (target_name, explicit_mode) = {
            let raw = config.theme_name.trim();
            match raw.rsplit_once(' ') {
                Some((n, m)) if m.eq_ignore_ascii_case("dark") => (n.trim(), Some(ThemeMode::Dark)),
                Some((n, m)) if m.eq_ignore_ascii_case("light") => {
                    (n.trim(), Some(ThemeMode::Light))
                }
                _ => (raw, None),
            }
        };

        // An explicit token in the config wins; otherwise follow the terminal.
        let target_mode = explicit_mode.unwrap_or(terminal_mode);

        let matches = |path: &str, mode: ThemeMode| -> bool {
            let stem = Path::new(path)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            stem.eq_ignore_ascii_case(target_name) && mode == target_mode
        };

        // Unknown names fall back to any entry in the target mode, then to the
        // first discovered entry.
        let index = available_themes
            .iter()
            .position(|(p, m)| matches(p, *m))
            .or_else(|| available_themes.iter().position(|(_, m)| *m == target_mode))
            .unwrap_or(0);

        match available_themes.get(index) {
            Some((path, mode)) => match load_theme(
                Path::new(path),
                *mode,
                config.logging.enable_performance_metrics,
            ) {
                Ok(theme) => (theme, index),
                Err(e) => {
                    tracing::error!("Failed to load theme '{}': {}", path, e);
                    (Theme::default(), 0)
                }
            },
            None => (Theme::default(), 0),
        }
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Auto-dismiss expired notifications
            if let Some(notification) = &self.notification
                && notification.should_dismiss()
            {
                self.clear_notification();
            }

            tui.draw(|f| self.ui(f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    // Check for terminal events
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            if !self.running {
                break;
            }
        }

        // Persist the (possibly switched) theme choice, but only when a config
        // file was loaded to begin with.
        if self.config.source.is_some() {
            self.config.save();
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Quit);
            }
            KeyCode::Esc => {
                // Esc dismisses an active notification before it quits the app
                let action = match self.notification.is_some() {
                    true => Action::ClearNotification,
                    false => Action::Quit,
                };
                let _ = self.action_tx.send(action);
            }
            KeyCode::Char('t') => {
                let _ = self.action_tx.send(Action::SwitchTheme);
            }
            _ => {}
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::SwitchTheme => self.switch_theme(),
            Action::ClearNotification => self.clear_notification(),
        }
    }

    /// Toggle between the dark and light variant of the current theme; when
    /// the counterpart entry is missing, fall back to the first entry in the
    /// other mode, then to plain cycling.
    fn switch_theme(&mut self) {
        if self.available_themes.is_empty() {
            self.notify_warning("No theme files discovered");
            return;
        }

        let (path, mode) = self.available_themes[self.current_theme_index].clone();
        let next_mode = mode.toggle();

        let next_index = self
            .available_themes
            .iter()
            .position(|(p, m)| *p == path && *m == next_mode)
            .or_else(|| {
                self.available_themes
                    .iter()
                    .position(|(_, m)| *m == next_mode)
            })
            .unwrap_or((self.current_theme_index + 1) % self.available_themes.len());

        let (filename, new_mode) = self.available_themes[next_index].clone();
        match load_theme(
            Path::new(&filename),
            new_mode,
            self.config.logging.enable_performance_metrics,
        ) {
            Ok(theme) => {
                let stem = Path::new(&filename)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                self.theme = theme;
                self.current_theme_index = next_index;
                self.config.theme_name = format!("{} {}", stem, new_mode);
                self.notify_info(format!("Theme: {} ({})", stem, new_mode));
            }
            Err(e) => {
                tracing::error!("Failed to load theme '{}': {}", filename, e);
                self.notify_error(format!("Failed to load theme: {}", filename));
            }
        }
    }

    pub fn ui(&self, f: &mut Frame) {
        super::view::draw(self, f);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
