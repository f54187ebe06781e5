//! Built-in demo case used when no snapshot exists yet.

use crate::constants::SEED_CASE_ID;
use crate::error::{CoreError, CoreResult};
use crate::models::{
    ActivityItem, ActivityType, Comment, Demographics, EvidenceLink, EvidenceReliability,
    MatchStatus, Mention, Presence, Priority, Reliability, RiskLevel, Suspect, SuspectStatus, Task,
    TaskStatus, TeamMember, TeamRole, Thread, ThreadCategory, User, Witness, WitnessStatus,
};
use crate::store::{CaseData, SavedSearch, WitnessFilter};
use crate::time_format::parse_iso;

/// Reference instant the seeded discussion timestamps were written against
pub const DISCUSSION_NOW: &str = "2025-04-05T14:57:47";

/// Reference instant the seeded activity feed was written against
pub const ACTIVITY_NOW: &str = "2025-04-05T14:45:50";

pub fn case_data() -> CoreResult<CaseData> {
    Ok(CaseData {
        users: users(),
        threads: threads()?,
        witnesses: witnesses(),
        suspects: suspects()?,
        activities: activities()?,
        tasks: tasks()?,
        team_members: team_members()?,
        saved_searches: saved_searches()?,
    })
}

pub fn users() -> Vec<User> {
    vec![
        User::new("user-001", "Det. Sarah Johnson", avatar("women", 41), "Lead Investigator"),
        User::new("user-002", "Det. Michael Chen", avatar("men", 42), "Investigator"),
        User::new("user-003", "Emily Rodriguez", avatar("women", 43), "Forensic Analyst"),
        User::new("user-004", "Captain David Wilson", avatar("men", 44), "Supervisor"),
        User::new("user-005", "Dr. Alicia Martinez", avatar("women", 45), "Consultant"),
    ]
}

fn avatar(kind: &str, n: u32) -> String {
    format!("https://randomuser.me/api/portraits/{}/{}.jpg", kind, n)
}

fn user(id: &str) -> CoreResult<User> {
    users()
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| CoreError::not_found("user", id))
}

/// Mention of `user` at the first `@Name` in `text`
fn mention(id: &str, text: &str, user: &User) -> CoreResult<Mention> {
    let token = format!("@{}", user.name);
    let start = text
        .find(&token)
        .ok_or_else(|| CoreError::validation(format!("seed text does not mention {}", user.name)))?;
    let mut mention = Mention::new(user, start, start + token.len());
    mention.id = id.to_string();
    Ok(mention)
}

fn comment(id: &str, author: User, content: &str, at: &str) -> CoreResult<Comment> {
    Ok(Comment::new(author, content, parse_iso(at)?).with_id(id))
}

#[allow(clippy::too_many_arguments)]
fn thread(
    id: &str,
    title: &str,
    content: &str,
    author: User,
    at: &str,
    category: ThreadCategory,
    reference_id: &str,
    view_count: u64,
) -> CoreResult<Thread> {
    let mut thread = Thread::new(SEED_CASE_ID, title, content, author, category, parse_iso(at)?);
    thread.id = id.to_string();
    thread.reference_id = Some(reference_id.to_string());
    thread.view_count = view_count;
    Ok(thread)
}

pub fn threads() -> CoreResult<Vec<Thread>> {
    let sarah = user("user-001")?;
    let michael = user("user-002")?;
    let emily = user("user-003")?;
    let david = user("user-004")?;

    let mut evidence = thread(
        "thread-001",
        "Key Evidence Found at Crime Scene",
        "I found something interesting at the scene that we might have missed initially. \
         There are partial fingerprints on the window frame that appear to have been overlooked. \
         I've requested additional analysis from the lab. Has anyone else noticed anything \
         unusual about the entry point?",
        sarah.clone(),
        "2025-04-05T13:30:22",
        ThreadCategory::Evidence,
        "ev-2025-042",
        15,
    )?;
    evidence.is_sticky = true;

    let reply_text = "I can help with that @Captain David Wilson. \
                      We should have results back by tomorrow morning.";
    let reply = comment("comment-002", emily.clone(), reply_text, "2025-04-05T13:52:19")?
        .with_mentions(vec![mention("mention-001", reply_text, &david)?]);
    let first = comment(
        "comment-001",
        david,
        "Great find, Sarah! I'll check with the forensics team to see if they can expedite \
         analysis on these prints.",
        "2025-04-05T13:45:37",
    )?
    .with_replies(vec![reply]);
    evidence.add_comment(first);

    let mut witness = thread(
        "thread-002",
        "Witness Statement Inconsistencies",
        "I've been reviewing the statements from our primary witnesses and noticed some \
         concerning inconsistencies in their timeline descriptions. Specifically, Witness #3 \
         (John Doe) mentioned seeing the suspect at 10:30 PM, but Witness #5 (Jane Smith) \
         claimed the suspect was across town at 10:15-10:45 PM. We need to re-interview both \
         to clarify this discrepancy.",
        michael,
        "2025-04-05T11:15:43",
        ThreadCategory::Witness,
        "wit-2025-018",
        8,
    )?;
    witness.is_pinned = true;

    let answer_text = "Good catch, Michael. I've scheduled re-interviews for tomorrow morning. \
                       @Emily Rodriguez can you join me for these? Your expertise in reading \
                       behavioral cues would be helpful.";
    let answer = comment("comment-003", sarah.clone(), answer_text, "2025-04-05T11:30:15")?
        .with_mentions(vec![mention("mention-002", answer_text, &emily)?]);
    witness.add_comment(answer);

    let timeline = thread(
        "thread-003",
        "Case Timeline Updated",
        "I've updated our case timeline with the new information from the traffic camera \
         footage. The suspect's vehicle appears at 10:22 PM at the intersection of Main and \
         Oak, which helps narrow down our timeline. Please review the updated sequence of events.",
        sarah,
        "2025-04-04T16:08:37",
        ThreadCategory::Timeline,
        "timeline-087",
        12,
    )?;

    Ok(vec![evidence, witness, timeline])
}

#[allow(clippy::too_many_arguments)]
fn witness(
    id: &str,
    name: &str,
    contact: &str,
    relationship: &str,
    status: WitnessStatus,
    reliability: Reliability,
    last_contact: &str,
    case: (&str, &str),
    statements_count: u32,
    upcoming_interview: Option<&str>,
) -> Witness {
    Witness {
        id: id.to_string(),
        name: name.to_string(),
        contact: contact.to_string(),
        relationship: relationship.to_string(),
        status,
        reliability,
        last_contact: last_contact.to_string(),
        case_id: case.0.to_string(),
        case_name: case.1.to_string(),
        statements_count,
        upcoming_interview: upcoming_interview.map(str::to_string),
    }
}

pub fn witnesses() -> Vec<Witness> {
    let robbery = ("case-001", "Downtown Robbery");
    let warehouse = ("case-002", "Warehouse Break-in");
    let vehicle = ("case-003", "Vehicle Theft");

    vec![
        witness(
            "wit-001",
            "Jane Smith",
            "555-123-4567",
            "Bystander",
            WitnessStatus::Cooperative,
            Reliability::High,
            "2025-04-01",
            robbery,
            2,
            Some("2025-04-10 10:00 AM"),
        ),
        witness(
            "wit-002",
            "Michael Johnson",
            "555-987-6543",
            "Neighbor",
            WitnessStatus::Reluctant,
            Reliability::Medium,
            "2025-03-25",
            robbery,
            1,
            None,
        ),
        witness(
            "wit-003",
            "Sarah Williams",
            "555-345-6789",
            "Store clerk",
            WitnessStatus::Cooperative,
            Reliability::High,
            "2025-04-03",
            warehouse,
            3,
            Some("2025-04-12 2:30 PM"),
        ),
        witness(
            "wit-004",
            "David Lee",
            "555-789-0123",
            "Security guard",
            WitnessStatus::Cooperative,
            Reliability::High,
            "2025-04-02",
            warehouse,
            2,
            None,
        ),
        witness(
            "wit-005",
            "Emily Chen",
            "555-234-5678",
            "Driver",
            WitnessStatus::Uncooperative,
            Reliability::Low,
            "2025-03-20",
            vehicle,
            1,
            Some("2025-04-15 9:00 AM"),
        ),
    ]
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

struct SuspectSeed {
    id: &'static str,
    case: (&'static str, &'static str),
    name: &'static str,
    status: SuspectStatus,
    demographics: Demographics,
    last_known_location: Option<&'static str>,
    occupation: Option<&'static str>,
    notes: Option<&'static str>,
    risk_level: RiskLevel,
    evidence_links: Vec<EvidenceLink>,
    created_at: &'static str,
    updated_at: &'static str,
}

impl SuspectSeed {
    fn build(self) -> CoreResult<Suspect> {
        Ok(Suspect {
            id: self.id.to_string(),
            case_id: self.case.0.to_string(),
            case_name: text(self.case.1),
            name: self.name.to_string(),
            status: self.status,
            demographics: self.demographics,
            last_known_location: self.last_known_location.map(str::to_string),
            occupation: self.occupation.map(str::to_string),
            notes: self.notes.map(str::to_string),
            risk_level: Some(self.risk_level),
            evidence_links: self.evidence_links,
            created_at: parse_iso(self.created_at)?,
            updated_at: parse_iso(self.updated_at)?,
        })
    }
}

fn link(
    evidence_id: &str,
    evidence_type: &str,
    match_status: MatchStatus,
    reliability: EvidenceReliability,
    confidence_pct: Option<u8>,
) -> EvidenceLink {
    EvidenceLink {
        evidence_id: evidence_id.to_string(),
        evidence_type: text(evidence_type),
        match_status,
        reliability,
        confidence_pct,
    }
}

fn looks(age: u32, gender: &str, height: &str, weight: &str, hair: &str, eyes: &str) -> Demographics {
    Demographics {
        age: Some(age),
        gender: text(gender),
        height: text(height),
        weight: text(weight),
        hair_color: text(hair),
        eye_color: text(eyes),
        ..Default::default()
    }
}

pub fn suspects() -> CoreResult<Vec<Suspect>> {
    let missing = ("case-001", "Missing Person - John Doe");
    let burglary = ("case-002", "Burglary at 123 Main St");
    let pharmacy = ("case-003", "Pharmacy Robbery");

    let seeds = vec![
        SuspectSeed {
            id: "suspect-001",
            case: missing,
            name: "Robert Anderson",
            status: SuspectStatus::PersonOfInterest,
            demographics: Demographics {
                identifying_features: text("Scar on left cheek, tattoo on right forearm"),
                criminal_history: text("Prior arrests for burglary and assault"),
                ..looks(34, "Male", "6'1\"", "190 lbs", "Brown", "Blue")
            },
            last_known_location: Some("157 Oak Street, Apartment 3B"),
            occupation: Some("Construction Worker"),
            notes: Some("Last person seen with victim before disappearance"),
            risk_level: RiskLevel::Medium,
            evidence_links: vec![
                link("ev-2025-031", "biological", MatchStatus::PartialMatch, EvidenceReliability::High, Some(70)),
                link("ev-2025-034", "testimonial", MatchStatus::Match, EvidenceReliability::Medium, None),
                link("ev-2025-036", "physical", MatchStatus::NoMatch, EvidenceReliability::Low, None),
            ],
            created_at: "2025-03-16T10:15:00",
            updated_at: "2025-03-18T14:30:00",
        },
        SuspectSeed {
            id: "suspect-002",
            case: missing,
            name: "Sarah Williams",
            status: SuspectStatus::Witness,
            demographics: looks(29, "Female", "5'6\"", "135 lbs", "Blonde", "Green"),
            last_known_location: Some("234 Maple Avenue"),
            occupation: Some("Bartender at The Lucky Clover"),
            notes: Some("Reported seeing victim with an unknown man on the night of disappearance"),
            risk_level: RiskLevel::Low,
            evidence_links: Vec::new(),
            created_at: "2025-03-16T12:45:00",
            updated_at: "2025-03-16T18:20:00",
        },
        SuspectSeed {
            id: "suspect-003",
            case: burglary,
            name: "James Miller",
            status: SuspectStatus::Suspect,
            demographics: Demographics {
                identifying_features: text("Neck tattoo, pierced left ear"),
                criminal_history: text("Multiple prior arrests for burglary and theft"),
                ..looks(27, "Male", "5'10\"", "170 lbs", "Black", "Brown")
            },
            last_known_location: None,
            occupation: None,
            notes: Some("Known to operate in the area, matches description from security footage"),
            risk_level: RiskLevel::High,
            evidence_links: vec![
                link("ev-2025-040", "digital", MatchStatus::Match, EvidenceReliability::High, Some(90)),
                link("ev-2025-041", "physical", MatchStatus::Match, EvidenceReliability::High, None),
                link("ev-2025-042", "digital", MatchStatus::PartialMatch, EvidenceReliability::Medium, None),
            ],
            created_at: "2025-03-29T08:30:00",
            updated_at: "2025-03-30T11:15:00",
        },
        SuspectSeed {
            id: "suspect-004",
            case: burglary,
            name: "Daniel Johnson",
            status: SuspectStatus::PersonOfInterest,
            demographics: Demographics {
                known_associates: text("Known associate of James Miller"),
                criminal_history: text("Prior arrests for possession of stolen property"),
                ..looks(31, "Male", "6'0\"", "185 lbs", "Brown", "Hazel")
            },
            last_known_location: None,
            occupation: Some("Unemployed"),
            notes: None,
            risk_level: RiskLevel::Medium,
            evidence_links: vec![
                link("ev-2025-041", "physical", MatchStatus::PossibleMatch, EvidenceReliability::Medium, None),
                link("ev-2025-043", "documentary", MatchStatus::NoMatch, EvidenceReliability::High, None),
            ],
            created_at: "2025-03-29T09:45:00",
            updated_at: "2025-03-30T14:20:00",
        },
        SuspectSeed {
            id: "suspect-005",
            case: pharmacy,
            name: "Michael Thompson",
            status: SuspectStatus::Arrested,
            demographics: Demographics {
                identifying_features: text("Scar above right eyebrow"),
                criminal_history: text("Prior arrests for drug possession and robbery"),
                ..looks(25, "Male", "5'9\"", "160 lbs", "Red", "Blue")
            },
            last_known_location: Some("789 Pine Street, Basement Apartment"),
            occupation: None,
            notes: Some("Arrested with evidence linking to the crime scene"),
            risk_level: RiskLevel::High,
            evidence_links: vec![
                link("ev-2025-050", "physical", MatchStatus::Match, EvidenceReliability::High, None),
                link("ev-2025-051", "physical", MatchStatus::Match, EvidenceReliability::High, Some(95)),
                link("ev-2025-052", "physical", MatchStatus::PartialMatch, EvidenceReliability::Medium, None),
                link("ev-2025-053", "biological", MatchStatus::Match, EvidenceReliability::High, None),
            ],
            created_at: "2025-04-02T09:30:00",
            updated_at: "2025-04-02T16:45:00",
        },
        SuspectSeed {
            id: "suspect-006",
            case: pharmacy,
            name: "Jennifer Davis",
            status: SuspectStatus::Witness,
            demographics: looks(42, "Female", "5'4\"", "130 lbs", "Brown", "Brown"),
            last_known_location: None,
            occupation: Some("Pharmacy Technician"),
            notes: Some("Present during robbery, provided detailed description of the perpetrator"),
            risk_level: RiskLevel::Low,
            evidence_links: vec![link(
                "ev-2025-052",
                "physical",
                MatchStatus::Inconclusive,
                EvidenceReliability::Medium,
                None,
            )],
            created_at: "2025-04-01T17:20:00",
            updated_at: "2025-04-02T10:15:00",
        },
    ];

    seeds.into_iter().map(SuspectSeed::build).collect()
}

/// (id, type, user id, timestamp, content, item id, item name)
type ActivityRow = (
    &'static str,
    ActivityType,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

pub fn activities() -> CoreResult<Vec<ActivityItem>> {
    let rows: [ActivityRow; 10] = [
        ("act-001", ActivityType::EvidenceAdded, "user-001", "2025-04-05T14:30:22",
         "Added new evidence", "ev-2025-042", "Surveillance Camera Footage"),
        ("act-002", ActivityType::WitnessAdded, "user-002", "2025-04-05T14:15:10",
         "Added new witness", "wit-2025-018", "John Doe"),
        ("act-003", ActivityType::TaskCreated, "user-001", "2025-04-05T13:42:33",
         "Created new task", "task-078", "Interview store clerk"),
        ("act-004", ActivityType::FileUploaded, "user-003", "2025-04-05T13:38:47",
         "Uploaded forensic analysis report", "file-2025-053", "DNA_Analysis.pdf"),
        ("act-005", ActivityType::CommentAdded, "user-004", "2025-04-05T13:12:21",
         "Added comment on evidence", "comment-129", "Need additional analysis on this item"),
        ("act-006", ActivityType::TeamMemberAdded, "user-001", "2025-04-05T11:58:14",
         "Added team member to case", "user-005", "Dr. Alicia Martinez"),
        ("act-007", ActivityType::TaskCompleted, "user-002", "2025-04-05T10:42:05",
         "Completed task", "task-076", "Canvass neighborhood for witnesses"),
        ("act-008", ActivityType::ReportGenerated, "user-001", "2025-04-05T09:17:39",
         "Generated progress report", "report-2025-014", "Weekly Investigation Status Report"),
        ("act-009", ActivityType::SuspectAdded, "user-002", "2025-04-04T16:33:52",
         "Added new suspect", "sus-2025-027", "Jane Smith"),
        ("act-010", ActivityType::TimelineEventAdded, "user-001", "2025-04-04T15:21:18",
         "Added timeline event", "timeline-087", "Suspect seen leaving scene"),
    ];

    rows.into_iter()
        .map(|(id, activity_type, user_id, at, content, item_id, item_name)| {
            let author = user(user_id)?;
            let mut item = ActivityItem {
                id: id.to_string(),
                activity_type,
                user_id: author.id,
                user_name: author.name,
                user_avatar: author.avatar,
                timestamp: parse_iso(at)?,
                content: content.to_string(),
                item_id: text(item_id),
                item_name: text(item_name),
                parent_item_id: None,
                parent_item_type: None,
            };
            if id == "act-005" {
                item.parent_item_id = text("ev-2025-039");
                item.parent_item_type = text("evidence");
            }
            Ok(item)
        })
        .collect()
}

struct TaskSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: Priority,
    assignee: &'static str,
    due: &'static str,
    created: &'static str,
    updated: &'static str,
    completed: Option<&'static str>,
    tags: &'static [&'static str],
    attachments: u32,
    comments: u32,
}

impl TaskSeed {
    fn build(self) -> CoreResult<Task> {
        Ok(Task {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            status: self.status,
            priority: self.priority,
            assigned_to: user(self.assignee)?,
            due_date: parse_iso(self.due)?,
            created_at: parse_iso(self.created)?,
            updated_at: parse_iso(self.updated)?,
            completed_at: self.completed.map(parse_iso).transpose()?,
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            attachments: self.attachments,
            comments: self.comments,
        })
    }
}

pub fn tasks() -> CoreResult<Vec<Task>> {
    let seeds = vec![
        TaskSeed {
            id: "task-001",
            title: "Interview witness John Smith again",
            description: "Follow up on inconsistencies in the initial statement. \
                          Focus on timeline between 10PM-11PM.",
            status: TaskStatus::Pending,
            priority: Priority::High,
            assignee: "user-001",
            due: "2025-04-10T00:00:00",
            created: "2025-04-03T15:30:00",
            updated: "2025-04-03T15:30:00",
            completed: None,
            tags: &["witness", "interview", "follow-up"],
            attachments: 2,
            comments: 3,
        },
        TaskSeed {
            id: "task-002",
            title: "Analyze fingerprints from crime scene",
            description: "Process the fingerprints found on the window frame and compare \
                          with suspect database.",
            status: TaskStatus::InProgress,
            priority: Priority::Urgent,
            assignee: "user-003",
            due: "2025-04-08T00:00:00",
            created: "2025-04-05T09:15:00",
            updated: "2025-04-05T13:22:00",
            completed: None,
            tags: &["forensics", "evidence", "fingerprints"],
            attachments: 1,
            comments: 2,
        },
        TaskSeed {
            id: "task-003",
            title: "Review traffic camera footage",
            description: "Check footage from cameras on Main Street between 10PM-12AM \
                          for suspect vehicle.",
            status: TaskStatus::Completed,
            priority: Priority::Medium,
            assignee: "user-002",
            due: "2025-04-04T00:00:00",
            created: "2025-04-02T10:45:00",
            updated: "2025-04-04T16:30:00",
            completed: Some("2025-04-04T16:30:00"),
            tags: &["surveillance", "evidence", "footage"],
            attachments: 4,
            comments: 5,
        },
        TaskSeed {
            id: "task-004",
            title: "Contact store owner for security footage",
            description: "Reach out to the owner of the jewelry store to obtain internal \
                          security camera footage.",
            status: TaskStatus::Blocked,
            priority: Priority::High,
            assignee: "user-002",
            due: "2025-04-06T00:00:00",
            created: "2025-04-03T11:20:00",
            updated: "2025-04-05T14:15:00",
            completed: None,
            tags: &["surveillance", "evidence", "footage"],
            attachments: 0,
            comments: 2,
        },
        TaskSeed {
            id: "task-005",
            title: "Prepare case briefing for Captain",
            description: "Create a comprehensive briefing document summarizing case \
                          progress for Captain Wilson.",
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            assignee: "user-001",
            due: "2025-04-09T00:00:00",
            created: "2025-04-04T09:00:00",
            updated: "2025-04-05T11:45:00",
            completed: None,
            tags: &["reporting", "briefing"],
            attachments: 3,
            comments: 1,
        },
    ];

    seeds.into_iter().map(TaskSeed::build).collect()
}

#[allow(clippy::too_many_arguments)]
fn member(
    id: &str,
    role: TeamRole,
    department: &str,
    badge: &str,
    email: &str,
    phone: &str,
    presence: Presence,
    last_active: &str,
    tasks: (u32, u32),
) -> CoreResult<TeamMember> {
    let profile = user(id)?;
    Ok(TeamMember {
        id: profile.id,
        name: profile.name,
        role,
        avatar: profile.avatar,
        department: department.to_string(),
        badge: badge.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        presence,
        last_active: parse_iso(last_active)?,
        assigned_tasks: tasks.0,
        completed_tasks: tasks.1,
    })
}

pub fn team_members() -> CoreResult<Vec<TeamMember>> {
    Ok(vec![
        member(
            "user-001",
            TeamRole::LeadInvestigator,
            "Homicide Division",
            "SFPD-7281",
            "sarah.johnson@sfpd.example.gov",
            "(555) 123-4567",
            Presence::Online,
            "2025-04-05 14:30:22",
            (7, 3),
        )?,
        member(
            "user-002",
            TeamRole::Investigator,
            "Robbery Division",
            "SFPD-6392",
            "michael.chen@sfpd.example.gov",
            "(555) 234-5678",
            Presence::Online,
            "2025-04-05 14:28:15",
            (5, 2),
        )?,
        member(
            "user-003",
            TeamRole::ForensicAnalyst,
            "Forensics Lab",
            "FL-3481",
            "emily.rodriguez@forensics.example.gov",
            "(555) 345-6789",
            Presence::Away,
            "2025-04-05 13:45:33",
            (3, 1),
        )?,
        member(
            "user-004",
            TeamRole::Supervisor,
            "Major Crimes Unit",
            "SFPD-4513",
            "david.wilson@sfpd.example.gov",
            "(555) 456-7890",
            Presence::Busy,
            "2025-04-05 14:05:41",
            (0, 0),
        )?,
        member(
            "user-005",
            TeamRole::Consultant,
            "Behavioral Analysis",
            "CONSULT-098",
            "alicia.martinez@fbi.example.gov",
            "(555) 567-8901",
            Presence::Offline,
            "2025-04-04 18:22:10",
            (2, 2),
        )?,
    ])
}

pub fn saved_searches() -> CoreResult<Vec<SavedSearch>> {
    let mut high = SavedSearch::new(
        "High Reliability Witnesses",
        WitnessFilter {
            reliability: Some(Reliability::High),
            ..Default::default()
        },
    )?;
    high.id = "search-001".to_string();

    let mut upcoming = SavedSearch::new(
        "Upcoming Interviews",
        WitnessFilter {
            has_upcoming_interview: true,
            ..Default::default()
        },
    )?;
    upcoming.id = "search-002".to_string();

    Ok(vec![high, upcoming])
}
