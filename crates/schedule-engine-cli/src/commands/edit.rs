use anyhow::{anyhow, bail, Result};
use schedule_engine::{
    prepare_submission, Event, EventDraft, Notice, RepeatRule, SaveMode, Submission,
};

use crate::render;
use crate::session::Session;
use crate::EventFields;

const DEFAULT_NOTIFY_MINUTES: u32 = 10;

impl EventFields {
    /// Overlay the given fields onto `draft`.
    fn apply(self, mut draft: EventDraft) -> EventDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(location) = self.location {
            draft.location = location;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if self.repeat.is_some() || self.interval.is_some() {
            let kind = self.repeat.unwrap_or(draft.repeat.kind);
            let interval = self.interval.unwrap_or(draft.repeat.interval.max(1));
            draft.repeat = RepeatRule::new(kind, interval);
        }
        if let Some(minutes) = self.notify {
            draft.notification_time = minutes;
        }
        draft
    }
}

pub fn add(session: &mut Session, fields: EventFields, force: bool) -> Result<()> {
    let draft = fields.apply(EventDraft {
        notification_time: DEFAULT_NOTIFY_MINUTES,
        ..Default::default()
    });
    submit(session, draft, None, force, SaveMode::Create)
}

pub fn update(session: &mut Session, id: &str, fields: EventFields, force: bool) -> Result<()> {
    let existing = session
        .ops
        .events()
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("일정을 찾을 수 없습니다: {id}"))?;
    let draft = fields.apply(EventDraft::from(&existing));
    submit(session, draft, Some(&existing), force, SaveMode::Update)
}

pub fn delete(session: &mut Session, id: &str) -> Result<()> {
    let notice = session.ops.delete_event(id);
    report(session, notice)
}

fn submit(
    session: &mut Session,
    draft: EventDraft,
    editing: Option<&Event>,
    force: bool,
    mode: SaveMode,
) -> Result<()> {
    let event = match prepare_submission(draft, session.ops.events(), editing) {
        Submission::Rejected(notice) => bail!("{notice}"),
        Submission::Ready(event) => event,
        Submission::Conflicts { event, overlapping } => {
            if !force {
                let refs: Vec<&Event> = overlapping.iter().collect();
                bail!(
                    "일정 겹침 경고: 다음 일정과 겹칩니다:\n{}\n계속 진행하려면 --force 를 사용하세요.",
                    render::event_list(&refs)
                );
            }
            tracing::warn!(conflicts = overlapping.len(), "saving despite overlap");
            event
        }
    };
    let notice = session.ops.save_event(event, mode);
    report(session, notice)
}

fn report(session: &Session, notice: Notice) -> Result<()> {
    if notice.is_error() {
        bail!("{notice}");
    }
    if session.json {
        println!("{}", serde_json::to_string_pretty(&notice)?);
    } else {
        println!("{notice}");
    }
    Ok(())
}
