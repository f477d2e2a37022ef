//! Request and response records for the Uber Direct API.
//!
//! Records are built from the self-validating types in [`crate::fields`].
//! Request records implement [`Validate`](crate::validation::Validate) for
//! the constraints that depend on their context; the resource handles in
//! [`crate::resources`] run it before sending anything.

mod common;
mod deliveries;
mod proof_of_delivery;
mod quotes;
mod robo_courier;

pub use common::LatLng;
pub use deliveries::{
    Courier, CourierPublicPhoneInfo, Delivery, DeliveryBarcodeRequirement,
    DeliveryCreateRequest, DeliveryDropoffVerification, DeliveryExternalUserInfo,
    DeliveryExternalUserInfoDevice, DeliveryExternalUserInfoMerchantAccount,
    DeliveryIdentificationRequirement, DeliveryManifestItem, DeliveryManifestItemCustomization,
    DeliveryManifestItemCustomizationOption, DeliveryManifestItemCustomizationOptionTaxInfo,
    DeliveryManifestItemDimensions, DeliveryPickupVerification, DeliveryPincodeRequirement,
    DeliveryReturnVerificationRequirement, DeliverySignatureRequirement, DeliveryUpdateRequest,
    DeliveryUpdateVerification, DeliveryUserFeesSummary, DeliveryUserFeesSummaryTaxInfo,
    TestSpecifications, MIN_DEVICE_ID_CHARS, PINCODE_DIGITS,
};
pub use proof_of_delivery::{ProofOfDeliveryRequest, ProofOfDeliveryResponse};
pub use quotes::{QuoteRequest, QuoteResponse};
pub use robo_courier::{
    RoboCourier, RoboCourierAuto, RoboCourierCustom, MAX_PICKUP_TO_DROPOFF_HOURS,
};
