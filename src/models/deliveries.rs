//! Delivery request and response records.
//!
//! Request records are plain structs with public fields. Optional fields are
//! omitted from the JSON body when they are `None`. Constraints that depend
//! on context are declared with `#[derive(Validate)]`; the resource handles
//! run them before any request is sent.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DeliveryBarcodeRequirementType, DeliveryDeliverableAction, DeliveryManifestItemSize,
    DeliveryPincodeRequirementType, DeliveryStatus, DeliveryUndeliverableAction,
};
use crate::fields::{
    Latitude, Longitude, Money, Notes, PhoneNumber, StructuredAddress, TimeWindows,
};
use crate::models::common::LatLng;
use crate::models::robo_courier::RoboCourier;
use crate::validation::{non_negative, Validate};

/// Minimum length of an end-user device identifier.
pub const MIN_DEVICE_ID_CHARS: usize = 256;

/// Number of digits of a merchant-provided pincode.
pub const PINCODE_DIGITS: usize = 4;

// ============================================================================
// Manifest
// ============================================================================

/// Tax applied to a customization option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryManifestItemCustomizationOptionTaxInfo {
    /// Tax percentage, wire-encoded like money: 12.5% is `1250000`.
    pub tax_percentage: Money,
}

/// One option of an item customization, e.g. "Gluten Free".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryManifestItemCustomizationOption {
    /// Option name.
    pub name: String,
    /// Option price.
    pub price: Money,
    /// How many times the option applies.
    pub quantity: i64,
    /// Tax information for the option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_tax_info: Option<DeliveryManifestItemCustomizationOptionTaxInfo>,
}

/// A customization group, e.g. "Bun Type".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryManifestItemCustomization {
    /// Group name.
    pub name: String,
    /// Selected options.
    pub options: Vec<DeliveryManifestItemCustomizationOption>,
}

/// Item dimensions in centimeters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryManifestItemDimensions {
    /// Length.
    #[validate(range(min = 1, code = "greater_than_equal", message = "must be greater than or equal to 1"))]
    pub length: i64,
    /// Height.
    #[validate(range(min = 1, code = "greater_than_equal", message = "must be greater than or equal to 1"))]
    pub height: i64,
    /// Depth.
    #[validate(range(min = 1, code = "greater_than_equal", message = "must be greater than or equal to 1"))]
    pub depth: i64,
}

/// An item being delivered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryManifestItem {
    /// Description shown to the courier.
    pub name: String,
    /// Number of units, at least one.
    #[validate(range(min = 1, code = "greater_than_equal", message = "must be greater than or equal to 1"))]
    pub quantity: i64,
    /// Approximate size. The API assumes small when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<DeliveryManifestItemSize>,
    /// Exact dimensions. Take precedence over `size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub dimensions: Option<DeliveryManifestItemDimensions>,
    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    /// Weight in grams, at least one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, code = "greater_than_equal", message = "must be greater than or equal to 1"))]
    pub weight: Option<i64>,
    /// VAT percentage, wire-encoded like money: 12.5% is `1250000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_percentage: Option<Money>,
    /// Customizations of the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_customizations: Option<Vec<DeliveryManifestItemCustomization>>,
}

impl DeliveryManifestItem {
    /// Creates an item with a name and quantity.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            size: None,
            dimensions: None,
            price: None,
            weight: None,
            vat_percentage: None,
            item_customizations: None,
        }
    }
}

// ============================================================================
// Verification Requirements
// ============================================================================

/// Signature collection at a waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySignatureRequirement {
    /// A signature is required.
    pub enabled: bool,
    /// The signer's name is required.
    pub collect_signer_name: bool,
    /// The signer's relationship to the recipient is required.
    pub collect_signer_relationship: bool,
}

/// A barcode the courier must scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryBarcodeRequirement {
    /// Encoded value.
    pub value: String,
    /// Symbology.
    #[serde(rename = "type")]
    pub kind: DeliveryBarcodeRequirementType,
}

/// Identity and age check at a waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryIdentificationRequirement {
    /// Minimum age to verify.
    pub min_age: u32,
    /// Skip the sobriety check. Must be `false` for alcohol.
    pub no_sobriety_check: bool,
}

/// Pincode entry at handoff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_pincode"))]
pub struct DeliveryPincodeRequirement {
    /// A pincode is required.
    pub enabled: bool,
    /// How the pincode is generated. The API defaults to `default`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeliveryPincodeRequirementType>,
    /// The pincode itself, for [`DeliveryPincodeRequirementType::MerchantProvided`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Merchant-provided pincodes must be exactly four ASCII digits.
fn validate_pincode(
    requirement: &DeliveryPincodeRequirement,
) -> Result<(), validator::ValidationError> {
    if requirement.kind != Some(DeliveryPincodeRequirementType::MerchantProvided) {
        return Ok(());
    }
    let valid = requirement.value.as_deref().is_some_and(|value| {
        value.len() == PINCODE_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
    });
    if valid {
        return Ok(());
    }
    let mut error = validator::ValidationError::new("pincode_format");
    error.message = Some(Cow::Borrowed(
        "merchant provided pincodes must be exactly 4 digits",
    ));
    Err(error)
}

/// Steps required before pickup completes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPickupVerification {
    /// Signature collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_requirement: Option<DeliverySignatureRequirement>,
    /// Barcodes to scan, one entry per scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<DeliveryBarcodeRequirement>>,
    /// Identity check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<DeliveryIdentificationRequirement>,
    /// A photo is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<bool>,
}

/// Steps required before dropoff completes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryDropoffVerification {
    /// Signature collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_requirement: Option<DeliverySignatureRequirement>,
    /// Barcodes to scan, one entry per scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<DeliveryBarcodeRequirement>>,
    /// Pincode entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub pincode: Option<DeliveryPincodeRequirement>,
    /// Identity check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<DeliveryIdentificationRequirement>,
    /// A photo is required as proof of delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<bool>,
}

/// Steps required before a return completes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryReturnVerificationRequirement {
    /// Signature collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_requirement: Option<DeliverySignatureRequirement>,
    /// Barcodes to scan, one entry per scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<DeliveryBarcodeRequirement>>,
    /// A photo is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<bool>,
    /// Pincode entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub pincode: Option<DeliveryPincodeRequirement>,
}

/// Barcode-only verification accepted when updating a delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUpdateVerification {
    /// Barcodes to scan, one entry per scan.
    pub barcodes: Vec<DeliveryBarcodeRequirement>,
}

// ============================================================================
// End-User Information and Fees
// ============================================================================

/// The end-user's account with the merchant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryExternalUserInfoMerchantAccount {
    /// E-mail used to create the account.
    #[validate(email(code = "value_error", message = "value is not a valid email address"))]
    pub email: String,
    /// When the account was created.
    pub account_created_at: DateTime<FixedOffset>,
}

/// The end-user's device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryExternalUserInfoDevice {
    /// Unique device identifier, at least [`MIN_DEVICE_ID_CHARS`] characters.
    #[validate(length(min = 256, code = "too_short", message = "must be at least 256 characters"))]
    pub id: String,
}

/// Information that helps identify the end-user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeliveryExternalUserInfo {
    /// Device details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub device: Option<DeliveryExternalUserInfoDevice>,
    /// Merchant account details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub merchant_account: Option<DeliveryExternalUserInfoMerchantAccount>,
}

/// Tax applied to a fee line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUserFeesSummaryTaxInfo {
    /// Tax added to the amount.
    pub tax_rate: Money,
}

/// One line of the order value breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUserFeesSummary {
    /// Line amount.
    pub amount: Money,
    /// Fee type, e.g. `delivery fee` or `promo`.
    pub fee_type: String,
    /// Tax on the line.
    pub user_fee_tax_info: DeliveryUserFeesSummaryTaxInfo,
}

/// Sandbox-only settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TestSpecifications {
    /// Simulated courier behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robo_courier_specification: Option<RoboCourier>,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST deliveries`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeliveryCreateRequest {
    /// Pickup location name shown to the courier.
    pub pickup_name: String,
    /// Pickup address.
    pub pickup_address: StructuredAddress,
    /// Store contact at pickup.
    pub pickup_phone_number: PhoneNumber,
    /// Business name. Overrides `pickup_name` in the courier app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_business_name: Option<String>,
    /// Pickup latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_latitude: Option<Latitude>,
    /// Pickup longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_longitude: Option<Longitude>,
    /// Courier instructions at pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_notes: Option<Notes>,
    /// Steps required before pickup completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_verification: Option<DeliveryPickupVerification>,
    /// Dropoff location name shown to the courier.
    pub dropoff_name: String,
    /// Dropoff address.
    pub dropoff_address: StructuredAddress,
    /// Recipient contact.
    pub dropoff_phone_number: PhoneNumber,
    /// Business name at dropoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_business_name: Option<String>,
    /// Dropoff latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_latitude: Option<Latitude>,
    /// Dropoff longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_longitude: Option<Longitude>,
    /// Courier instructions at dropoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_notes: Option<Notes>,
    /// Merchant instructions at dropoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_seller_notes: Option<Notes>,
    /// Steps required before dropoff completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub dropoff_verification: Option<DeliveryDropoffVerification>,
    /// Pickup and dropoff windows.
    #[serde(flatten)]
    pub time_windows: TimeWindows,
    /// Items being delivered, at least one.
    #[validate]
    #[validate(length(min = 1, code = "too_short", message = "must contain at least 1 item"))]
    pub manifest_items: Vec<DeliveryManifestItem>,
    /// Handoff action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable_action: Option<DeliveryDeliverableAction>,
    /// Merchant reference for the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_reference: Option<String>,
    /// Value of the items being delivered.
    pub manifest_total_value: Money,
    /// Quote to honor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    /// What to do when the recipient is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undeliverable_action: Option<DeliveryUndeliverableAction>,
    /// Tip for the courier, included in the delivery fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "non_negative")]
    pub tip: Option<Money>,
    /// Deduplicates creation requests for the same account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    /// Partner reference for the store. Must match the one used when quoting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_store_id: Option<String>,
    /// Courier instructions for return trips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_notes: Option<Notes>,
    /// Steps required before a return completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub return_verification: Option<DeliveryReturnVerificationRequirement>,
    /// End-user identification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub external_user_info: Option<DeliveryExternalUserInfo>,
    /// Additional aggregator reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Order value breakdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fees_summary: Option<Vec<DeliveryUserFeesSummary>>,
    /// Sandbox-only settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_specifications: Option<TestSpecifications>,
}

impl DeliveryCreateRequest {
    /// Creates a request with the required fields and no optional ones.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        pickup_name: impl Into<String>,
        pickup_address: StructuredAddress,
        pickup_phone_number: PhoneNumber,
        dropoff_name: impl Into<String>,
        dropoff_address: StructuredAddress,
        dropoff_phone_number: PhoneNumber,
        manifest_items: Vec<DeliveryManifestItem>,
        manifest_total_value: Money,
    ) -> Self {
        Self {
            pickup_name: pickup_name.into(),
            pickup_address,
            pickup_phone_number,
            pickup_business_name: None,
            pickup_latitude: None,
            pickup_longitude: None,
            pickup_notes: None,
            pickup_verification: None,
            dropoff_name: dropoff_name.into(),
            dropoff_address,
            dropoff_phone_number,
            dropoff_business_name: None,
            dropoff_latitude: None,
            dropoff_longitude: None,
            dropoff_notes: None,
            dropoff_seller_notes: None,
            dropoff_verification: None,
            time_windows: TimeWindows::default(),
            manifest_items,
            deliverable_action: None,
            manifest_reference: None,
            manifest_total_value,
            quote_id: None,
            undeliverable_action: None,
            tip: None,
            idempotency_key: None,
            external_store_id: None,
            return_notes: None,
            return_verification: None,
            external_user_info: None,
            external_id: None,
            user_fees_summary: None,
            test_specifications: None,
        }
    }
}

/// Body of `POST deliveries/{id}`. Only the fields set are changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeliveryUpdateRequest {
    /// Courier instructions at pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_notes: Option<Notes>,
    /// Barcodes to scan at pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_verification: Option<DeliveryUpdateVerification>,
    /// Courier instructions at dropoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_notes: Option<Notes>,
    /// Dropoff latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_latitude: Option<Latitude>,
    /// Dropoff longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_longitude: Option<Longitude>,
    /// Barcodes to scan at dropoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_verification: Option<DeliveryUpdateVerification>,
    /// Pickup and dropoff windows.
    #[serde(flatten)]
    pub time_windows: TimeWindows,
    /// Merchant reference for the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_reference: Option<String>,
    /// Tip paid by the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "non_negative")]
    pub tip_by_customer: Option<Money>,
}

// ============================================================================
// Responses
// ============================================================================

/// Masked courier contact details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierPublicPhoneInfo {
    /// Phone number with the pin code, formatted for dialing.
    pub formatted_phone_number: String,
    /// Anonymized phone number.
    pub phone_number: String,
    /// Pin code required when dialing.
    pub pin_code: String,
}

/// The courier assigned to a delivery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    /// First name and last initial.
    pub name: String,
    /// e.g. `bicycle`, `car`, `walker`.
    pub vehicle_type: String,
    /// Masked phone number reachable from the dropoff phone.
    pub phone_number: String,
    /// Current position.
    pub location: LatLng,
    /// Profile image URL.
    pub img_href: String,
    /// Masked contact details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_phone_info: Option<CourierPublicPhoneInfo>,
}

/// A delivery as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Identifier, prefixed `del_`.
    pub id: String,
    /// Quote the delivery was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    /// Lifecycle status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
    /// The delivery has ended, whatever the outcome.
    pub complete: bool,
    /// Assigned courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier: Option<Courier>,
    /// The courier is close to the next waypoint.
    pub courier_imminent: bool,
    /// Creation time.
    pub created: DateTime<FixedOffset>,
    /// Lower-case ISO currency code.
    pub currency: String,
    /// Handoff action.
    pub deliverable_action: DeliveryDeliverableAction,
    /// End of the dropoff window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_deadline: Option<DateTime<FixedOffset>>,
    /// Estimated dropoff.
    pub dropoff_eta: DateTime<FixedOffset>,
    /// Amount charged, tip included.
    pub fee: Money,
    /// End of the pickup window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_deadline: Option<DateTime<FixedOffset>>,
    /// Estimated courier arrival at pickup.
    pub pickup_eta: DateTime<FixedOffset>,
    /// Start of the pickup window.
    pub pickup_ready: DateTime<FixedOffset>,
    /// Alternative identifier.
    pub uuid: Uuid,
    /// Unauthenticated tracking page.
    pub tracking_url: String,
}
