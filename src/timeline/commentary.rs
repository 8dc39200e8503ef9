//! Commentary events and progressive narration text.
//!
//! A commentary block is a sequence of literal text and event markers. Text is "read" at a fixed
//! speed starting from the block's start time; an event resolves at the moment the reading cursor
//! reaches it. Resolved events become anchors that windows can start from
//! ([`PhaseTools::at_event`](crate::PhaseTools::at_event)) and scrub markers in
//! [`TimeInfo`] form.

/// Handle to an event declared with [`EventRegistry::declare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub(crate) u32);

/// A named marker and the phase time at which it is reached, once placed into commentary.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CommentaryEvent {
    pub label: String,
    /// Pause inserted into the reading cursor right after the label.
    pub dwell: f64,
    pub time: Option<f64>,
}

/// A named breakpoint collected during a frame, used for scrub markers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeInfo {
    pub name: String,
    pub time: f64,
}

/// One element of a commentary template.
#[derive(Clone, Debug, PartialEq)]
pub enum CommentaryPart {
    Text(String),
    Event(EventId),
}

impl From<&str> for CommentaryPart {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for CommentaryPart {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<EventId> for CommentaryPart {
    fn from(id: EventId) -> Self {
        Self::Event(id)
    }
}

/// A run of text that becomes visible once `gate` is reached.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CommentarySegment {
    pub text: String,
    pub gate: f64,
}

/// Handle to a commentary block built during the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommentaryRef {
    pub(crate) index: usize,
    pub start: f64,
    pub end: f64,
}

/// The resolved commentary for the current frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CommentaryRes {
    pub segments: Vec<CommentarySegment>,
    pub start: f64,
    pub end: f64,
    /// Text through the farthest reached event.
    pub visible: String,
}

impl CommentaryRes {
    pub fn full_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn refresh_visible(&mut self, now: f64) {
        self.visible.clear();
        for seg in self.segments.iter().take_while(|s| s.gate <= now) {
            self.visible.push_str(&seg.text);
        }
    }
}

/// Per-frame event and commentary registry. Built empty at the start of each frame.
#[derive(Clone, Debug)]
pub struct EventRegistry {
    now: f64,
    chars_per_sec: f64,
    events: Vec<CommentaryEvent>,
    blocks: Vec<CommentaryRes>,
    times: Vec<TimeInfo>,
}

impl EventRegistry {
    pub fn new(now: f64, chars_per_sec: f64) -> Self {
        let chars_per_sec = if chars_per_sec.is_finite() && chars_per_sec > 0.0 {
            chars_per_sec
        } else {
            crate::program::config::DEFAULT_CHARS_PER_SEC
        };
        Self {
            now,
            chars_per_sec,
            events: Vec::new(),
            blocks: Vec::new(),
            times: Vec::new(),
        }
    }

    /// Declare a named event without attaching any text to it.
    pub fn declare(&mut self, label: impl Into<String>, dwell: f64) -> EventId {
        let id = EventId(self.events.len() as u32);
        self.events.push(CommentaryEvent {
            label: label.into(),
            dwell: if dwell.is_finite() { dwell.max(0.0) } else { 0.0 },
            time: None,
        });
        id
    }

    pub fn event(&self, id: EventId) -> Option<&CommentaryEvent> {
        self.events.get(id.0 as usize)
    }

    pub fn event_time(&self, id: EventId) -> Option<f64> {
        self.event(id).and_then(|e| e.time)
    }

    /// Start a new commentary block at `start`.
    pub fn commentary(
        &mut self,
        start: f64,
        parts: impl IntoIterator<Item = CommentaryPart>,
    ) -> CommentaryRef {
        self.blocks.push(CommentaryRes {
            start,
            end: start,
            ..CommentaryRes::default()
        });
        let index = self.blocks.len() - 1;
        self.append(index, parts)
    }

    /// Append a continuation paragraph to an existing block, starting where it ended.
    pub fn commentary_para(
        &mut self,
        parent: CommentaryRef,
        parts: impl IntoIterator<Item = CommentaryPart>,
    ) -> CommentaryRef {
        self.append(parent.index, parts)
    }

    fn append(
        &mut self,
        index: usize,
        parts: impl IntoIterator<Item = CommentaryPart>,
    ) -> CommentaryRef {
        let Some(block) = self.blocks.get(index) else {
            return CommentaryRef {
                index,
                start: f64::INFINITY,
                end: f64::INFINITY,
            };
        };
        let mut cursor = block.end;
        let mut pending = String::new();
        let mut segments = Vec::new();

        for part in parts {
            match part {
                CommentaryPart::Text(s) => {
                    cursor += self.read_secs(&s);
                    pending.push_str(&s);
                }
                CommentaryPart::Event(id) => {
                    let Some(ev) = self.events.get_mut(id.0 as usize) else {
                        continue;
                    };
                    cursor += ev.label.chars().count() as f64 / self.chars_per_sec;
                    pending.push_str(&ev.label);
                    // First placement wins; re-placing an event only adds its label.
                    if ev.time.is_none() {
                        ev.time = Some(cursor);
                        self.times.push(TimeInfo {
                            name: ev.label.clone(),
                            time: cursor,
                        });
                    }
                    segments.push(CommentarySegment {
                        text: std::mem::take(&mut pending),
                        gate: cursor,
                    });
                    cursor += ev.dwell;
                }
            }
        }
        if !pending.is_empty() {
            segments.push(CommentarySegment {
                text: pending,
                gate: cursor,
            });
        }

        let now = self.now;
        let block = &mut self.blocks[index];
        block.segments.extend(segments);
        block.end = cursor;
        block.refresh_visible(now);
        CommentaryRef {
            index,
            start: block.start,
            end: block.end,
        }
    }

    fn read_secs(&self, s: &str) -> f64 {
        s.chars().count() as f64 / self.chars_per_sec
    }

    pub fn times(&self) -> &[TimeInfo] {
        &self.times
    }

    /// The most recently started block, which is what the narration panel shows.
    pub fn current(&self) -> Option<&CommentaryRes> {
        self.blocks.last()
    }

    pub(crate) fn into_parts(mut self) -> (Vec<TimeInfo>, Option<CommentaryRes>) {
        let current = self.blocks.pop();
        (self.times, current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/commentary.rs"]
mod tests;
