//! Business routes. Each is a fixed route name and body/payload shape over
//! the generic [`IntegratorClient::call`] primitive.
//!
//! Routes without a documented success payload return `Response<Value>` so
//! whatever the service sends back stays visible.
//!
//! # Errors
//!
//! Every method fails only as [`IntegratorClient::call`] does.

#![allow(clippy::missing_errors_doc)]

use serde_json::Value;

use super::IntegratorClient;
use crate::envelope::Response;
use crate::error::Error;
use crate::types::{
    AddinCollection, AddressBook, Call, CallAction, Contact, ContactRecord, CreateNewRecordBody, DoActionBody,
    HookStateReply, MakeCallBody, PeerRecord, PingBody, PingReply, RecordType, RegisterBody, SaveRecordBody,
    SearchBody, ShowWindowBody, VersionInfo,
};

/// Route names as the service spells them.
pub mod route {
    pub const REGISTER: &str = "Register";
    pub const RECORD_SUSPEND: &str = "RecordSuspend";
    pub const RECORD_RESUME: &str = "RecordResume";
    pub const SEARCH: &str = "Search";
    pub const SEARCH_PEERS: &str = "SearchPeers";
    pub const ADDRESS_BOOKS: &str = "AddressBooks";
    pub const MAKE_CALL: &str = "MakeCall";
    pub const SHOW_WINDOW: &str = "ShowWindow";
    pub const DO_ACTION: &str = "DoAction";
    pub const VERSION: &str = "Version";
    pub const UNLOAD: &str = "Unload";
    pub const PING: &str = "Ping";
    pub const OWNER_CONTACT: &str = "OwnerContact";
    pub const HOOK_STATE: &str = "HookState";
    pub const RECORD_TYPES: &str = "RecordTypes";
    pub const CREATE_NEW_RECORD: &str = "CreateNewRecord";
    pub const SAVE_RECORD: &str = "SaveRecord";
    pub const ANSWER: &str = "Answer";
    pub const HANGUP: &str = "Hangup";
    pub const TRANSFER_COMPLETE: &str = "TransferComplete";
    pub const TRANSFER_CONSULT: &str = "TransferConsult";
    pub const TRANSFER_CANCEL: &str = "TransferCancel";
    pub const TRANSFER_BLIND: &str = "TransferBlind";
    pub const SEND_DTMF: &str = "SendDtmf";
    pub const DEFLECT: &str = "Deflect";
    pub const HOLD: &str = "Hold";
    pub const UNHOLD: &str = "Unhold";
    pub const PICKUP: &str = "Pickup";
}

impl IntegratorClient {
    // =========================================================================
    // SESSION
    // =========================================================================

    pub async fn register(&self, body: &RegisterBody) -> Result<Response<Value>, Error> {
        self.post(route::REGISTER, body).await
    }

    pub async fn unload(&self) -> Result<Response<Value>, Error> {
        self.post_empty(route::UNLOAD).await
    }

    pub async fn ping(&self, body: &PingBody) -> Result<Response<PingReply>, Error> {
        self.post(route::PING, body).await
    }

    pub async fn version(&self) -> Result<Response<VersionInfo>, Error> {
        self.get(route::VERSION).await
    }

    pub async fn show_window(&self, body: &ShowWindowBody) -> Result<Response<Value>, Error> {
        self.post(route::SHOW_WINDOW, body).await
    }

    pub async fn record_suspend(&self) -> Result<Response<Value>, Error> {
        self.post_empty(route::RECORD_SUSPEND).await
    }

    pub async fn record_resume(&self) -> Result<Response<Value>, Error> {
        self.post_empty(route::RECORD_RESUME).await
    }

    // =========================================================================
    // DIRECTORY & RECORDS
    // =========================================================================

    pub async fn search(&self, body: &SearchBody) -> Result<Response<Vec<AddinCollection>>, Error> {
        self.post(route::SEARCH, body).await
    }

    pub async fn search_peers(&self, body: &SearchBody) -> Result<Response<Vec<PeerRecord>>, Error> {
        self.post(route::SEARCH_PEERS, body).await
    }

    pub async fn address_books(&self) -> Result<Response<Vec<AddressBook>>, Error> {
        self.get(route::ADDRESS_BOOKS).await
    }

    pub async fn owner_contact(&self) -> Result<Response<Contact>, Error> {
        self.get(route::OWNER_CONTACT).await
    }

    pub async fn record_types(&self) -> Result<Response<Vec<RecordType>>, Error> {
        self.get(route::RECORD_TYPES).await
    }

    pub async fn create_new_record(&self, body: &CreateNewRecordBody) -> Result<Response<ContactRecord>, Error> {
        self.post(route::CREATE_NEW_RECORD, body).await
    }

    pub async fn save_record(&self, body: &SaveRecordBody) -> Result<Response<ContactRecord>, Error> {
        self.post(route::SAVE_RECORD, body).await
    }

    pub async fn do_action(&self, body: &DoActionBody) -> Result<Response<Value>, Error> {
        self.post(route::DO_ACTION, body).await
    }

    // =========================================================================
    // CALL CONTROL
    // =========================================================================

    pub async fn make_call(&self, body: &MakeCallBody) -> Result<Response<Call>, Error> {
        self.post(route::MAKE_CALL, body).await
    }

    /// Current hook state. The service expects a POST here.
    pub async fn hook_state(&self) -> Result<Response<HookStateReply>, Error> {
        self.post_empty(route::HOOK_STATE).await
    }

    pub async fn answer(&self) -> Result<Response<Value>, Error> {
        self.post_empty(route::ANSWER).await
    }

    pub async fn hangup(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::HANGUP, body).await
    }

    pub async fn transfer_complete(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::TRANSFER_COMPLETE, body).await
    }

    pub async fn transfer_consult(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::TRANSFER_CONSULT, body).await
    }

    pub async fn transfer_cancel(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::TRANSFER_CANCEL, body).await
    }

    pub async fn transfer_blind(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::TRANSFER_BLIND, body).await
    }

    pub async fn send_dtmf(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::SEND_DTMF, body).await
    }

    pub async fn deflect(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::DEFLECT, body).await
    }

    pub async fn hold(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::HOLD, body).await
    }

    pub async fn unhold(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::UNHOLD, body).await
    }

    pub async fn pickup(&self, body: &CallAction) -> Result<Response<Value>, Error> {
        self.post(route::PICKUP, body).await
    }
}
