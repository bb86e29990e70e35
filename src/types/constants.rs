//! Wire parameter names and protocol constants

/// Request/response parameter names on the wire
pub mod params {
    /// Gateway login user
    pub const USER: &str = "USER";
    /// Merchant vendor id
    pub const VENDOR: &str = "VENDOR";
    /// Partner id
    pub const PARTNER: &str = "PARTNER";
    /// Gateway password
    pub const PWD: &str = "PWD";

    /// Client-generated idempotency key
    pub const REQUEST_ID: &str = "REQUEST_ID";
    /// Transaction type
    pub const TRXTYPE: &str = "TRXTYPE";
    /// Response verbosity
    pub const VERBOSITY: &str = "VERBOSITY";

    /// Tender type
    pub const TENDER: &str = "TENDER";
    /// Account number (card PAN or bank account)
    pub const ACCT: &str = "ACCT";
    /// Card expiry date (mmyy)
    pub const EXPDATE: &str = "EXPDATE";
    /// Card security code
    pub const CVV2: &str = "CVV2";
    /// Bank routing number
    pub const ABA: &str = "ABA";
    /// Bank account type
    pub const ACCTTYPE: &str = "ACCTTYPE";

    /// Transaction amount
    pub const AMT: &str = "AMT";
    /// Invoice number
    pub const INVNUM: &str = "INVNUM";
    /// Purchase order number
    pub const PONUM: &str = "PONUM";
    /// Free-text comment
    pub const COMMENT1: &str = "COMMENT1";
    /// Second free-text comment
    pub const COMMENT2: &str = "COMMENT2";

    /// Billing first name
    pub const BILLTOFIRSTNAME: &str = "BILLTOFIRSTNAME";
    /// Billing last name
    pub const BILLTOLASTNAME: &str = "BILLTOLASTNAME";
    /// Billing street
    pub const BILLTOSTREET: &str = "BILLTOSTREET";
    /// Billing city
    pub const BILLTOCITY: &str = "BILLTOCITY";
    /// Billing state
    pub const BILLTOSTATE: &str = "BILLTOSTATE";
    /// Billing postal code
    pub const BILLTOZIP: &str = "BILLTOZIP";
    /// Billing country
    pub const BILLTOCOUNTRY: &str = "BILLTOCOUNTRY";
    /// Billing phone
    pub const BILLTOPHONE: &str = "BILLTOPHONE";
    /// Billing email
    pub const BILLTOEMAIL: &str = "BILLTOEMAIL";

    /// Shipping first name
    pub const SHIPTOFIRSTNAME: &str = "SHIPTOFIRSTNAME";
    /// Shipping last name
    pub const SHIPTOLASTNAME: &str = "SHIPTOLASTNAME";
    /// Shipping street
    pub const SHIPTOSTREET: &str = "SHIPTOSTREET";
    /// Shipping city
    pub const SHIPTOCITY: &str = "SHIPTOCITY";
    /// Shipping state
    pub const SHIPTOSTATE: &str = "SHIPTOSTATE";
    /// Shipping postal code
    pub const SHIPTOZIP: &str = "SHIPTOZIP";
    /// Shipping country
    pub const SHIPTOCOUNTRY: &str = "SHIPTOCOUNTRY";

    /// Recurring profile name
    pub const PROFILENAME: &str = "PROFILENAME";
    /// Original profile id for modify/inquiry
    pub const ORIGPROFILEID: &str = "ORIGPROFILEID";
    /// Profile start date
    pub const START: &str = "START";
    /// Number of payments
    pub const TERM: &str = "TERM";
    /// Payment period
    pub const PAYPERIOD: &str = "PAYPERIOD";
    /// Optional transaction flag
    pub const OPTIONALTRX: &str = "OPTIONALTRX";
    /// Optional transaction amount
    pub const OPTIONALTRXAMT: &str = "OPTIONALTRXAMT";

    /// Customer IP for fraud screening
    pub const CUSTIP: &str = "CUSTIP";
    /// Customer host name for fraud screening
    pub const CUSTHOSTNAME: &str = "CUSTHOSTNAME";
    /// Customer browser for fraud screening
    pub const CUSTBROWSER: &str = "CUSTBROWSER";

    /// Buyer-auth authentication id
    pub const AUTHENTICATION_ID: &str = "AUTHENTICATION_ID";
    /// Buyer-auth authentication status
    pub const AUTHENTICATION_STATUS: &str = "AUTHENTICATION_STATUS";
    /// Cardholder authentication verification value
    pub const CAVV: &str = "CAVV";
    /// Electronic commerce indicator
    pub const ECI: &str = "ECI";
    /// Buyer-auth transaction id
    pub const XID: &str = "XID";
    /// Access control server URL
    pub const ACSURL: &str = "ACSURL";

    /// Transaction result code (mandatory on every response)
    pub const RESULT: &str = "RESULT";
    /// Response message
    pub const RESPMSG: &str = "RESPMSG";
    /// Gateway transaction reference
    pub const PNREF: &str = "PNREF";
    /// PayPal transaction reference
    pub const PPREF: &str = "PPREF";
    /// Authorization code
    pub const AUTHCODE: &str = "AUTHCODE";
    /// AVS street match
    pub const AVSADDR: &str = "AVSADDR";
    /// AVS postal-code match
    pub const AVSZIP: &str = "AVSZIP";
    /// International AVS indicator
    pub const IAVS: &str = "IAVS";
    /// CVV2 match
    pub const CVV2MATCH: &str = "CVV2MATCH";
    /// Processor AVS response
    pub const PROCAVS: &str = "PROCAVS";
    /// Processor CVV2 response
    pub const PROCCVV2: &str = "PROCCVV2";
    /// Original transaction result
    pub const ORIGRESULT: &str = "ORIGRESULT";
    /// Original transaction reference
    pub const ORIGPNREF: &str = "ORIGPNREF";
    /// Transaction state
    pub const TRANSSTATE: &str = "TRANSSTATE";
    /// Duplicate-submission indicator
    pub const DUPLICATE: &str = "DUPLICATE";
    /// Host processor code
    pub const HOSTCODE: &str = "HOSTCODE";
    /// Raw processor response text
    pub const RESPTEXT: &str = "RESPTEXT";
    /// Additional messages
    pub const ADDLMSGS: &str = "ADDLMSGS";
    /// Settlement batch id
    pub const BATCHID: &str = "BATCHID";
    /// Settlement date
    pub const SETTLE_DATE: &str = "SETTLE_DATE";
    /// Transaction processing start time
    pub const STARTTIME: &str = "STARTTIME";
    /// Transaction processing end time
    pub const ENDTIME: &str = "ENDTIME";
    /// Gateway correlation id
    pub const CORRELATIONID: &str = "CORRELATIONID";
    /// Card association response code
    pub const ASSOCIATIONRESPCODE: &str = "ASSOCIATIONRESPCODE";
    /// Processor transaction id
    pub const TRANSID: &str = "TRANSID";
    /// MagTek card-reader response
    pub const MAGTRESPONSE: &str = "MAGTRESPONSE";

    /// Pre-screening fraud filter message
    pub const PREFPSMSG: &str = "PREFPSMSG";
    /// Post-screening fraud filter message
    pub const POSTFPSMSG: &str = "POSTFPSMSG";

    /// Recurring profile reference
    pub const RPREF: &str = "RPREF";
    /// Recurring profile id
    pub const PROFILEID: &str = "PROFILEID";
    /// Optional transaction reference
    pub const TRXPNREF: &str = "TRXPNREF";
    /// Optional transaction result
    pub const TRXRESULT: &str = "TRXRESULT";
    /// Optional transaction response message
    pub const TRXRESPMSG: &str = "TRXRESPMSG";
}

/// Transaction types
pub mod trxtypes {
    /// Sale
    pub const SALE: &str = "S";
    /// Authorization
    pub const AUTHORIZATION: &str = "A";
    /// Credit
    pub const CREDIT: &str = "C";
    /// Void
    pub const VOID: &str = "V";
    /// Recurring profile action
    pub const RECURRING: &str = "R";
    /// Inquiry
    pub const INQUIRY: &str = "I";

    /// Check if a transaction type code is known
    pub fn is_supported(trxtype: &str) -> bool {
        matches!(
            trxtype,
            SALE | AUTHORIZATION | CREDIT | VOID | RECURRING | INQUIRY
        )
    }
}

/// Tender types
pub mod tenders {
    /// Credit or debit card
    pub const CARD: &str = "C";
    /// ACH bank account
    pub const ACH: &str = "A";
}
