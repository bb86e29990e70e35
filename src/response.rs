//! Response decomposition
//!
//! [`decompose`] distributes a decoded [`ParamList`] into typed response
//! objects. Constructors run in a fixed order (transaction, fraud, recurring,
//! buyer auth); each claims its known keys with [`ParamList::take`], removing
//! them so later constructors only see keys not yet claimed. If two object
//! types could ever claim the same key (a protocol invariant says they never
//! should), the first constructor in decomposition order wins.
//!
//! Keys still unclaimed after all constructors have run are recorded in the
//! submission [`Context`] as diagnostics, never as an error: the gateway may
//! return vendor-specific fields unknown to older clients.

use crate::codec::ParamList;
use crate::context::{Context, Severity};
use crate::types::constants::params;
use crate::{PayflowError, Result};
use serde::{Deserialize, Serialize};

/// Core transaction result, present on every gateway response.
///
/// `result == 0` is an approval; any other value is a gateway business
/// outcome (decline, validation rejection) carried here as ordinary data,
/// not an SDK error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Numeric result code; the only mandatory response field
    pub result: i32,
    /// Human-readable response message
    pub resp_msg: Option<String>,
    /// Gateway transaction reference
    pub pnref: Option<String>,
    /// PayPal transaction reference
    pub ppref: Option<String>,
    /// Authorization code
    pub auth_code: Option<String>,
    /// AVS street match indicator
    pub avs_addr: Option<String>,
    /// AVS postal-code match indicator
    pub avs_zip: Option<String>,
    /// International AVS indicator
    pub iavs: Option<String>,
    /// CVV2 match indicator
    pub cvv2_match: Option<String>,
    /// Raw processor AVS response
    pub proc_avs: Option<String>,
    /// Raw processor CVV2 response
    pub proc_cvv2: Option<String>,
    /// Original transaction result (inquiry)
    pub orig_result: Option<String>,
    /// Original transaction reference (inquiry)
    pub orig_pnref: Option<String>,
    /// Transaction state (inquiry)
    pub trans_state: Option<String>,
    /// Duplicate-submission indicator
    pub duplicate: Option<String>,
    /// Host processor code
    pub host_code: Option<String>,
    /// Raw processor response text
    pub resp_text: Option<String>,
    /// Additional gateway messages
    pub addl_msgs: Option<String>,
    /// Settlement batch id
    pub batch_id: Option<String>,
    /// Settlement date
    pub settle_date: Option<String>,
    /// Transaction processing start time
    pub start_time: Option<String>,
    /// Transaction processing end time
    pub end_time: Option<String>,
    /// Gateway correlation id
    pub correlation_id: Option<String>,
    /// Card association response code
    pub association_resp_code: Option<String>,
    /// Processor transaction id.
    ///
    /// Kept separate from [`magt_response`](Self::magt_response); earlier
    /// SDKs assigned both wire keys to one slot and the card-reader response
    /// silently overwrote the transaction id.
    pub trans_id: Option<String>,
    /// MagTek card-reader response
    pub magt_response: Option<String>,
}

impl TransactionResponse {
    /// Claim this object's keys from the mapping.
    ///
    /// `RESULT` is mandatory and must be numeric; absence or garbage is a
    /// fatal decode error for the whole transaction.
    pub fn from_params(p: &mut ParamList) -> Result<Self> {
        let raw_result = p.take(params::RESULT).ok_or_else(|| {
            PayflowError::malformed_response("Mandatory RESULT field is absent")
        })?;
        let result = raw_result.parse().map_err(|_| {
            PayflowError::malformed_response(format!(
                "Mandatory RESULT field is not numeric: {:?}",
                raw_result
            ))
        })?;

        Ok(Self {
            result,
            resp_msg: p.take(params::RESPMSG),
            pnref: p.take(params::PNREF),
            ppref: p.take(params::PPREF),
            auth_code: p.take(params::AUTHCODE),
            avs_addr: p.take(params::AVSADDR),
            avs_zip: p.take(params::AVSZIP),
            iavs: p.take(params::IAVS),
            cvv2_match: p.take(params::CVV2MATCH),
            proc_avs: p.take(params::PROCAVS),
            proc_cvv2: p.take(params::PROCCVV2),
            orig_result: p.take(params::ORIGRESULT),
            orig_pnref: p.take(params::ORIGPNREF),
            trans_state: p.take(params::TRANSSTATE),
            duplicate: p.take(params::DUPLICATE),
            host_code: p.take(params::HOSTCODE),
            resp_text: p.take(params::RESPTEXT),
            addl_msgs: p.take(params::ADDLMSGS),
            batch_id: p.take(params::BATCHID),
            settle_date: p.take(params::SETTLE_DATE),
            start_time: p.take(params::STARTTIME),
            end_time: p.take(params::ENDTIME),
            correlation_id: p.take(params::CORRELATIONID),
            association_resp_code: p.take(params::ASSOCIATIONRESPCODE),
            trans_id: p.take(params::TRANSID),
            magt_response: p.take(params::MAGTRESPONSE),
        })
    }

    /// Whether the gateway approved the transaction
    pub fn is_approved(&self) -> bool {
        self.result == 0
    }
}

/// Fraud-screening verdicts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudResponse {
    /// Pre-screening filter message
    pub pre_fps_msg: Option<String>,
    /// Post-screening filter message
    pub post_fps_msg: Option<String>,
}

impl FraudResponse {
    /// Claim this object's keys; `None` when the response carries none of them
    pub fn from_params(p: &mut ParamList) -> Option<Self> {
        let resp = Self {
            pre_fps_msg: p.take(params::PREFPSMSG),
            post_fps_msg: p.take(params::POSTFPSMSG),
        };
        if resp.pre_fps_msg.is_none() && resp.post_fps_msg.is_none() {
            None
        } else {
            Some(resp)
        }
    }
}

/// Recurring-profile identifiers and optional-transaction outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringResponse {
    /// Recurring profile reference
    pub rp_ref: Option<String>,
    /// Recurring profile id
    pub profile_id: Option<String>,
    /// Optional transaction reference
    pub trx_pnref: Option<String>,
    /// Optional transaction result
    pub trx_result: Option<String>,
    /// Optional transaction response message
    pub trx_resp_msg: Option<String>,
}

impl RecurringResponse {
    /// Claim this object's keys; `None` when the response carries none of them
    pub fn from_params(p: &mut ParamList) -> Option<Self> {
        let resp = Self {
            rp_ref: p.take(params::RPREF),
            profile_id: p.take(params::PROFILEID),
            trx_pnref: p.take(params::TRXPNREF),
            trx_result: p.take(params::TRXRESULT),
            trx_resp_msg: p.take(params::TRXRESPMSG),
        };
        if resp.rp_ref.is_none()
            && resp.profile_id.is_none()
            && resp.trx_pnref.is_none()
            && resp.trx_result.is_none()
            && resp.trx_resp_msg.is_none()
        {
            None
        } else {
            Some(resp)
        }
    }
}

/// Buyer-authentication (3-D Secure) outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerAuthResponse {
    /// Authentication id
    pub authentication_id: Option<String>,
    /// Authentication status
    pub authentication_status: Option<String>,
    /// Access control server URL
    pub acs_url: Option<String>,
    /// Cardholder authentication verification value
    pub cavv: Option<String>,
    /// Electronic commerce indicator
    pub eci: Option<String>,
    /// Authentication transaction id
    pub xid: Option<String>,
}

impl BuyerAuthResponse {
    /// Claim this object's keys; `None` when the response carries none of them
    pub fn from_params(p: &mut ParamList) -> Option<Self> {
        let resp = Self {
            authentication_id: p.take(params::AUTHENTICATION_ID),
            authentication_status: p.take(params::AUTHENTICATION_STATUS),
            acs_url: p.take(params::ACSURL),
            cavv: p.take(params::CAVV),
            eci: p.take(params::ECI),
            xid: p.take(params::XID),
        };
        if resp.authentication_id.is_none()
            && resp.authentication_status.is_none()
            && resp.acs_url.is_none()
            && resp.cavv.is_none()
            && resp.eci.is_none()
            && resp.xid.is_none()
        {
            None
        } else {
            Some(resp)
        }
    }
}

/// Typed result bundle returned to the caller after every submission.
///
/// The sub-objects may be partially populated when a failure occurred mid
/// submission; inspect [`Context`] in every case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Request id the submission was composed with (for re-query after timeout)
    pub request_id: String,
    /// Core transaction result
    pub transaction_response: Option<TransactionResponse>,
    /// Fraud-screening verdicts, when present
    pub fraud_response: Option<FraudResponse>,
    /// Recurring-profile identifiers, when present
    pub recurring_response: Option<RecurringResponse>,
    /// Buyer-authentication outcome, when present
    pub buyer_auth_response: Option<BuyerAuthResponse>,
    /// SDK-internal error log for this submission
    pub context: Context,
}

impl Response {
    pub(crate) fn empty(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            transaction_response: None,
            fraud_response: None,
            recurring_response: None,
            buyer_auth_response: None,
            context: Context::new(),
        }
    }
}

/// Distribute a decoded mapping into typed response objects.
///
/// Consumes the mapping; on success every key has been claimed by exactly one
/// object or recorded as an unclaimed diagnostic. On failure (mandatory
/// RESULT missing or non-numeric) no typed objects are produced.
pub fn decompose(
    mut p: ParamList,
    context: &mut Context,
) -> Result<(
    TransactionResponse,
    Option<FraudResponse>,
    Option<RecurringResponse>,
    Option<BuyerAuthResponse>,
)> {
    let transaction = TransactionResponse::from_params(&mut p)?;
    let fraud = FraudResponse::from_params(&mut p);
    let recurring = RecurringResponse::from_params(&mut p);
    let buyer_auth = BuyerAuthResponse::from_params(&mut p);

    for (name, value) in p.iter() {
        context.record(
            Severity::Info,
            "UnclaimedField",
            format!("{}={}", name, value),
        );
    }

    Ok((transaction, fraud, recurring, buyer_auth))
}
