//! Donation campaign rules.
//!
//! Amounts are integer minor units (cents) everywhere; conversion from the
//! client's decimal prices happens in [`crate::payments`].

use chrono::NaiveDate;

/// Smallest accepted donation, in cents.
pub const MIN_DONATION_CENTS: i64 = 100;

/// Upper bound on a campaign's target, in cents.
pub const MAX_CAMPAIGN_TARGET_CENTS: i64 = 100_000_000;

/// Snapshot of the campaign fields a donation is checked against.
#[derive(Debug, Clone, Copy)]
pub struct CampaignState {
    pub max_donation_cents: i64,
    pub donated_cents: i64,
    pub paused: bool,
    pub last_date: NaiveDate,
}

impl CampaignState {
    /// Cents still accepted before the campaign reaches its target.
    pub fn remaining_cents(&self) -> i64 {
        (self.max_donation_cents - self.donated_cents).max(0)
    }
}

/// Validate a campaign's target amount.
pub fn validate_campaign_target(max_donation_cents: i64) -> Result<(), String> {
    if !(MIN_DONATION_CENTS..=MAX_CAMPAIGN_TARGET_CENTS).contains(&max_donation_cents) {
        return Err(format!(
            "Campaign target must be between {MIN_DONATION_CENTS} and \
             {MAX_CAMPAIGN_TARGET_CENTS} cents"
        ));
    }
    Ok(())
}

/// Validate that `amount_cents` may be donated to a campaign on `today`.
pub fn validate_donation(
    campaign: &CampaignState,
    amount_cents: i64,
    today: NaiveDate,
) -> Result<(), String> {
    if amount_cents < MIN_DONATION_CENTS {
        return Err(format!(
            "Donation must be at least {MIN_DONATION_CENTS} cents"
        ));
    }
    if campaign.paused {
        return Err("Campaign is paused".to_string());
    }
    if today > campaign.last_date {
        return Err(format!("Campaign ended on {}", campaign.last_date));
    }
    if amount_cents > campaign.remaining_cents() {
        return Err(format!(
            "Donation exceeds the remaining campaign target of {} cents",
            campaign.remaining_cents()
        ));
    }
    Ok(())
}
