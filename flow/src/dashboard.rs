use strum_macros::Display;

/// One rotating banner slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub fn banner_slides() -> Vec<Banner> {
    vec![
        Banner {
            title: "Join Our Community",
            subtitle: "Connect with fellow professionals",
        },
        Banner {
            title: "Connect & Grow",
            subtitle: "Expand your network through challenges",
        },
        Banner {
            title: "Unlock Your Potential",
            subtitle: "Achieve success through gamification",
        },
        Banner {
            title: "Gamify Your Success",
            subtitle: "Track progress with our mobile app",
        },
    ]
}

/// Which slide is showing. Auto-advance and the arrow keys both wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    current: usize,
    len: usize,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
    }

    /// Dot navigation. Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.len {
            self.current = index;
        }
    }
}

/// Membership shown on a challenge card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CardRole {
    Participant,
    TeamLeader,
    Admin,
    Observer,
}

impl CardRole {
    pub fn label(self) -> &'static str {
        match self {
            CardRole::Participant => "Participant",
            CardRole::TeamLeader => "Team Leader",
            CardRole::Admin => "Admin",
            CardRole::Observer => "Observer",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CardRole::Participant => "👤",
            CardRole::TeamLeader => "👥",
            CardRole::Admin => "⚙️",
            CardRole::Observer => "👁️",
        }
    }
}

/// An active-challenge card on the dashboard rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeCard {
    pub title: &'static str,
    pub icon: &'static str,
    /// Percent complete, 0..=100.
    pub progress: u8,
    pub points: u32,
    pub role: CardRole,
    pub status: Option<&'static str>,
    pub participants: Option<u32>,
}

/// Fixture data behind the dashboard rail.
pub fn sample_challenges() -> Vec<ChallengeCard> {
    vec![
        ChallengeCard {
            title: "Morning Run Streak",
            icon: "🏃",
            progress: 72,
            points: 150,
            role: CardRole::TeamLeader,
            status: Some("Ends in 3 days"),
            participants: Some(12),
        },
        ChallengeCard {
            title: "Office Step Battle",
            icon: "💪",
            progress: 45,
            points: 200,
            role: CardRole::Participant,
            status: Some("Week 2 of 4"),
            participants: Some(28),
        },
        ChallengeCard {
            title: "Weekend Cycle Tour",
            icon: "🚴",
            progress: 10,
            points: 300,
            role: CardRole::Admin,
            status: Some("Just started"),
            participants: Some(7),
        },
        ChallengeCard {
            title: "Pool Laps League",
            icon: "🏊",
            progress: 88,
            points: 120,
            role: CardRole::Observer,
            status: None,
            participants: None,
        },
    ]
}
