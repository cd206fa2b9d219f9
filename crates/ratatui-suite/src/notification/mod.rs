//! Toast notifications grouped by screen corner.
//!
//! A [`NotificationRegistry`] is created by the application root and passed by `&mut` to
//! whatever raises notifications. Each [`Placement`] owns a [`NotificationStack`], created on the
//! first notice for that corner and dropped again once its last notice is removed (unless
//! [`NotificationConfig::remove_on_empty`] is off). Call [`NotificationRegistry::tick`] from the
//! event loop to expire timed notices, and draw with [`view::NotificationsView`].
use crate::text::Label;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use std::time::Instant;

pub mod view;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("unknown notification placement `{0}`")]
    UnknownPlacement(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placement {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Placement {
    pub const ALL: [Placement; 4] = [
        Placement::TopLeft,
        Placement::TopRight,
        Placement::BottomLeft,
        Placement::BottomRight,
    ];

    pub fn is_top(self) -> bool {
        matches!(self, Placement::TopLeft | Placement::TopRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Placement::TopLeft | Placement::BottomLeft)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placement::TopLeft => "topLeft",
            Placement::TopRight => "topRight",
            Placement::BottomLeft => "bottomLeft",
            Placement::BottomRight => "bottomRight",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `topLeft`, `top-left`, `top_left`, `Top Left`, and so on.
impl FromStr for Placement {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "topleft" => Ok(Placement::TopLeft),
            "topright" => Ok(Placement::TopRight),
            "bottomleft" => Ok(Placement::BottomLeft),
            "bottomright" => Ok(Placement::BottomRight),
            _ => Err(NotificationError::UnknownPlacement(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    #[default]
    Open,
    Info,
    Success,
    Warning,
    Error,
    Loading,
}

impl NotificationKind {
    /// Glyph shown before the title; plain notices have none.
    pub fn icon(self) -> Option<&'static str> {
        match self {
            NotificationKind::Open => None,
            NotificationKind::Info => Some("ℹ"),
            NotificationKind::Success => Some("✔"),
            NotificationKind::Warning => Some("⚠"),
            NotificationKind::Error => Some("✖"),
            NotificationKind::Loading => Some("◌"),
        }
    }
}

type CloseCallback = Box<dyn FnOnce()>;

/// Everything a notice can be configured with. Unset fields fall back to the registry's
/// [`NotificationConfig`].
#[derive(Default)]
pub struct NoticeOptions {
    pub title: Option<Label>,
    pub description: Option<Label>,
    /// Milliseconds before the notice closes itself; `0` keeps it until removed.
    pub duration_ms: Option<u64>,
    pub placement: Option<Placement>,
    pub on_close: Option<CloseCallback>,
}

impl NoticeOptions {
    pub fn new(description: impl Into<Label>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<Label>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<Label>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn on_close(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for NoticeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeOptions")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("duration_ms", &self.duration_ms)
            .field("placement", &self.placement)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Rows between the top edge and top-placed stacks.
    pub top: u16,
    /// Rows between the bottom edge and bottom-placed stacks.
    pub bottom: u16,
    pub placement: Placement,
    pub duration: Duration,
    /// Drop a placement's stack once its last notice is gone.
    pub remove_on_empty: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            top: 1,
            bottom: 1,
            placement: Placement::TopRight,
            duration: Duration::from_millis(4500),
            remove_on_empty: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoticeKey(u64);

/// Returned by every `open`-style call; removes its notice on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoticeHandle {
    pub key: NoticeKey,
    pub placement: Placement,
}

impl NoticeHandle {
    pub fn remove(self, registry: &mut NotificationRegistry) -> bool {
        registry.remove(self.key, Some(self.placement))
    }
}

pub struct Notice {
    pub key: NoticeKey,
    pub kind: NotificationKind,
    pub title: Option<Label>,
    pub description: Option<Label>,
    pub duration: Duration,
    pub created: Instant,
    on_close: Option<CloseCallback>,
}

impl Notice {
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.created) >= self.duration
    }

    fn close(mut self) {
        if let Some(f) = self.on_close.take() {
            f();
        }
    }
}

impl fmt::Debug for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notice")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// Notices of one placement, oldest first.
#[derive(Debug)]
pub struct NotificationStack {
    pub placement: Placement,
    /// Edge offset captured from the config when the stack was created.
    pub offset: u16,
    notices: Vec<Notice>,
}

impl NotificationStack {
    fn new(placement: Placement, config: &NotificationConfig) -> Self {
        let offset = if placement.is_top() {
            config.top
        } else {
            config.bottom
        };
        Self {
            placement,
            offset,
            notices: Vec::new(),
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    fn take(&mut self, key: NoticeKey) -> Option<Notice> {
        let pos = self.notices.iter().position(|n| n.key == key)?;
        Some(self.notices.remove(pos))
    }
}

#[derive(Debug, Default)]
pub struct NotificationRegistry {
    config: NotificationConfig,
    stacks: BTreeMap<Placement, NotificationStack>,
    next_key: u64,
}

impl NotificationRegistry {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Replaces the defaults. With `remove_existing`, every current stack is torn down first.
    pub fn configure(&mut self, config: NotificationConfig, remove_existing: bool) {
        if remove_existing {
            self.destroy(None);
        }
        self.config = config;
    }

    pub fn open(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.notice(NotificationKind::Open, options)
    }

    pub fn info(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.notice(NotificationKind::Info, options)
    }

    pub fn success(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.notice(NotificationKind::Success, options)
    }

    pub fn warning(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.notice(NotificationKind::Warning, options)
    }

    pub fn warn(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.warning(options)
    }

    pub fn error(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.notice(NotificationKind::Error, options)
    }

    pub fn loading(&mut self, options: NoticeOptions) -> NoticeHandle {
        self.notice(NotificationKind::Loading, options)
    }

    pub fn notice(&mut self, kind: NotificationKind, options: NoticeOptions) -> NoticeHandle {
        self.notice_at(kind, options, Instant::now())
    }

    /// Like [`Self::notice`] with an explicit creation time.
    pub fn notice_at(
        &mut self,
        kind: NotificationKind,
        options: NoticeOptions,
        now: Instant,
    ) -> NoticeHandle {
        let placement = options.placement.unwrap_or(self.config.placement);
        let duration = options
            .duration_ms
            .map(Duration::from_millis)
            .unwrap_or(self.config.duration);

        self.next_key += 1;
        let key = NoticeKey(self.next_key);
        let stack = self
            .stacks
            .entry(placement)
            .or_insert_with(|| NotificationStack::new(placement, &self.config));
        stack.notices.push(Notice {
            key,
            kind,
            title: options.title,
            description: options.description,
            duration,
            created: now,
            on_close: options.on_close,
        });
        tracing::debug!(?key, %placement, ?kind, "notification opened");

        NoticeHandle { key, placement }
    }

    /// Removes the notice and runs its close callback. Searches every placement when
    /// `placement` is `None` or names a corner with no stack. Returns `false` when there was
    /// nothing to remove.
    pub fn remove(&mut self, key: NoticeKey, placement: Option<Placement>) -> bool {
        let found = match placement.filter(|p| self.stacks.contains_key(p)) {
            Some(p) => self.stacks.get_mut(&p).and_then(|s| s.take(key)).map(|n| (p, n)),
            None => self
                .stacks
                .iter_mut()
                .find_map(|(p, s)| s.take(key).map(|n| (*p, n))),
        };
        let Some((placement, notice)) = found else {
            return false;
        };
        tracing::debug!(?key, %placement, "notification removed");
        notice.close();
        self.cleanup(placement);
        true
    }

    /// Drops one stack, or all of them, without running close callbacks.
    pub fn destroy(&mut self, placement: Option<Placement>) {
        match placement {
            Some(p) => {
                if self.stacks.remove(&p).is_some() {
                    tracing::debug!(placement = %p, "notification stack destroyed");
                }
            }
            None => {
                if !self.stacks.is_empty() {
                    tracing::debug!(count = self.stacks.len(), "notification stacks destroyed");
                }
                self.stacks.clear();
            }
        }
    }

    /// Closes every notice whose duration has elapsed at `now`. Returns how many closed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let expired: Vec<(Placement, NoticeKey)> = self
            .stacks
            .iter()
            .flat_map(|(p, s)| {
                s.notices
                    .iter()
                    .filter(|n| n.is_expired(now))
                    .map(move |n| (*p, n.key))
            })
            .collect();
        for (placement, key) in &expired {
            self.remove(*key, Some(*placement));
        }
        if !expired.is_empty() {
            tracing::trace!(count = expired.len(), "notifications expired");
        }
        expired.len()
    }

    pub fn stack(&self, placement: Placement) -> Option<&NotificationStack> {
        self.stacks.get(&placement)
    }

    pub fn stacks(&self) -> impl Iterator<Item = &NotificationStack> {
        self.stacks.values()
    }

    /// Number of live notices across all placements.
    pub fn len(&self) -> usize {
        self.stacks.values().map(|s| s.notices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cleanup(&mut self, placement: Placement) {
        let empty = self.stacks.get(&placement).is_some_and(|s| s.is_empty());
        if empty && self.config.remove_on_empty {
            self.stacks.remove(&placement);
            tracing::trace!(%placement, "empty notification stack dropped");
        }
    }
}
