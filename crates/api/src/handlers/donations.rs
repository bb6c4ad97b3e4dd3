//! Handlers for the `/donations` resource (tiers, checkout, Stripe webhook).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use sephirots_core::donations::{amount_cents, find_tier, DonationKind, DONATION_TIERS};
use sephirots_core::error::CoreError;
use sephirots_db::models::donation::{Donation, StartCheckout};
use sephirots_db::repositories::{BadgeRepo, DonationRepo};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::payments::stripe::{StripeError, WebhookEvent};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for a newly created checkout session.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    /// Hosted Stripe payment page the client should redirect to.
    pub checkout_url: String,
}

/// GET /api/v1/donations/tiers
///
/// The fixed donation tier catalog with both price points per tier.
pub async fn tiers() -> Json<DataResponse<&'static [sephirots_core::donations::DonationTier]>> {
    Json(DataResponse {
        data: DONATION_TIERS,
    })
}

/// POST /api/v1/donations/checkout
///
/// Create a Stripe Checkout Session for a tier and record a pending
/// donation keyed by the session id.
pub async fn checkout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<StartCheckout>,
) -> AppResult<(StatusCode, Json<DataResponse<CheckoutResponse>>)> {
    let tier = find_tier(&input.tier_slug)?;
    let kind: DonationKind = input.kind.parse()?;
    let amount = amount_cents(tier, kind);

    let mode = match kind {
        DonationKind::OneTime => "payment",
        DonationKind::Monthly => "subscription",
    };

    let session = state
        .stripe
        .create_checkout_session(amount, mode, tier.name)
        .await
        .map_err(|e| AppError::InternalError(format!("Stripe checkout error: {e}")))?;

    DonationRepo::create_pending(
        &state.pool,
        auth_user.user_id,
        tier.slug,
        kind.as_str(),
        amount,
        &session.id,
    )
    .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        tier = tier.slug,
        kind = %kind,
        amount_cents = amount,
        session_id = %session.id,
        "Checkout session created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CheckoutResponse {
                session_id: session.id,
                checkout_url: session.url,
            },
        }),
    ))
}

/// GET /api/v1/donations
///
/// The authenticated user's donation history, newest first.
pub async fn my_donations(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Donation>>>> {
    let donations = DonationRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: donations }))
}

/// POST /api/v1/donations/webhook
///
/// Stripe webhook endpoint. Verifies the signature against the raw body,
/// then settles the referenced donation. Completion is guarded on pending
/// status, so webhook retries settle exactly once; the supporter badge
/// award is idempotent as well.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<serde_json::Value>> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing Stripe-Signature header".into()))?;

    state
        .stripe
        .verify_webhook_signature(&body, signature)
        .map_err(|e| match e {
            StripeError::InvalidSignature | StripeError::MalformedHeader => {
                AppError::Core(CoreError::Unauthorized("Invalid webhook signature".into()))
            }
            other => AppError::InternalError(format!("Webhook verification error: {other}")),
        })?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let session_id = &event.data.object.id;
            if let Some(donation) =
                DonationRepo::complete_by_session(&state.pool, session_id).await?
            {
                award_supporter_badge(&state, &donation).await?;
                tracing::info!(
                    donation_id = donation.id,
                    user_id = donation.user_id,
                    tier = %donation.tier_slug,
                    "Donation completed"
                );
            } else {
                // Retry for an already-settled session; nothing to do.
                tracing::debug!(session_id = %session_id, "Webhook for settled session ignored");
            }
        }
        "checkout.session.expired" => {
            let failed = DonationRepo::fail_by_session(&state.pool, &event.data.object.id).await?;
            if failed {
                tracing::info!(session_id = %event.data.object.id, "Donation expired");
            }
        }
        other => {
            tracing::debug!(event_type = %other, "Unhandled webhook event type");
        }
    }

    Ok(Json(json!({ "received": true })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Award the tier's supporter badge for a completed donation.
async fn award_supporter_badge(state: &AppState, donation: &Donation) -> AppResult<()> {
    let tier = find_tier(&donation.tier_slug)?;
    let badge = BadgeRepo::find_by_name(&state.pool, tier.badge_name)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Supporter badge '{}' not seeded", tier.badge_name))
        })?;

    let awarded = BadgeRepo::award(&state.pool, donation.user_id, badge.id).await?;
    if awarded {
        tracing::info!(
            user_id = donation.user_id,
            badge_id = badge.id,
            badge = %badge.name,
            "Supporter badge awarded"
        );
    }
    Ok(())
}
