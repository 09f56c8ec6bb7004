//! Seed data for the in-memory record store
//!
//! The dashboard serves a fixed demo dataset: five campaigns, three tracked
//! links and a one-week performance series. Campaign timestamps are offset
//! from the clock at seed time so the relative-age column stays truthful
//! however long the process runs.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{Campaign, CampaignStatus, Channel, LinkStatus, StatPoint, TrackedLink};

/// Builds the campaign record store
pub fn seed_campaigns(now: DateTime<Utc>) -> Vec<Campaign> {
    vec![
        Campaign {
            id: "cmp_001".to_string(),
            name: "App Launch – iOS".to_string(),
            status: CampaignStatus::Active,
            channel: Channel::Paid,
            clicks: 8210,
            installs: 742,
            ctr: 0.09,
            cpi: 2.45,
            updated_at: now - Duration::minutes(18),
            description: Some(
                "Primary iOS launch campaign focused on paid acquisition.".to_string(),
            ),
        },
        Campaign {
            id: "cmp_002".to_string(),
            name: "Holiday Promo".to_string(),
            status: CampaignStatus::Paused,
            channel: Channel::Paid,
            clicks: 4102,
            installs: 301,
            ctr: 0.073,
            cpi: 3.1,
            updated_at: now - Duration::hours(12),
            description: Some("Seasonal promo campaign (paused post-holiday).".to_string()),
        },
        Campaign {
            id: "cmp_003".to_string(),
            name: "Referral Boost Q1".to_string(),
            status: CampaignStatus::Active,
            channel: Channel::Referral,
            clicks: 2890,
            installs: 402,
            ctr: 0.139,
            cpi: 1.8,
            updated_at: now - Duration::hours(36),
            description: Some("Boost referrals via incentives and share links.".to_string()),
        },
        Campaign {
            id: "cmp_004".to_string(),
            name: "Organic Search – Brand".to_string(),
            status: CampaignStatus::Active,
            channel: Channel::Organic,
            clicks: 6220,
            installs: 980,
            ctr: 0.112,
            cpi: 0.95,
            updated_at: now - Duration::hours(2),
            description: Some("Brand keyword visibility and conversion tracking.".to_string()),
        },
        Campaign {
            id: "cmp_005".to_string(),
            name: "Retargeting – Warm Users".to_string(),
            status: CampaignStatus::Draft,
            channel: Channel::Paid,
            clicks: 980,
            installs: 62,
            ctr: 0.051,
            cpi: 4.25,
            updated_at: now - Duration::hours(80),
            description: Some("Draft setup for retargeting warm audiences.".to_string()),
        },
    ]
}

/// Builds the tracked-link record store
///
/// `domain` is the branded short domain prefixed to every slug.
pub fn seed_links(domain: &str) -> Vec<TrackedLink> {
    vec![
        TrackedLink {
            id: "lnk_1".to_string(),
            name: "Winter Promo".to_string(),
            short_url: format!("{}/winter", domain),
            destination: "https://example.com/winter".to_string(),
            clicks: 8420,
            installs: 2310,
            status: LinkStatus::Active,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
        },
        TrackedLink {
            id: "lnk_2".to_string(),
            name: "Referral Invite".to_string(),
            short_url: format!("{}/invite", domain),
            destination: "myapp://referral".to_string(),
            clicks: 2210,
            installs: 690,
            status: LinkStatus::Active,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        },
        TrackedLink {
            id: "lnk_3".to_string(),
            name: "QR Store Display".to_string(),
            short_url: format!("{}/qr-store", domain),
            destination: "https://example.com/store".to_string(),
            clicks: 520,
            installs: 210,
            status: LinkStatus::Paused,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(),
        },
    ]
}

/// The demo one-week performance series shown on the link detail page
pub fn link_series() -> Vec<StatPoint> {
    let points = [
        ("Jan 1", 140, 32),
        ("Jan 2", 180, 40),
        ("Jan 3", 120, 28),
        ("Jan 4", 220, 55),
        ("Jan 5", 260, 62),
        ("Jan 6", 240, 58),
        ("Jan 7", 300, 74),
    ];

    points
        .into_iter()
        .map(|(day, clicks, installs)| StatPoint {
            day: day.to_string(),
            clicks,
            installs,
        })
        .collect()
}
