//! Static table of facade operations.
//!
//! Each row names a facade operation, the remote method identifier it
//! forwards to, and the positional signature its arguments must match.
//! Adding a business operation means appending a row here.

use super::signature::ParamKind::{self, Boolean, Number, Object, Text};

/// Descriptor of one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteMethod {
    /// Facade operation name, as accepted by `WebApiClient::call`.
    pub name: &'static str,
    /// Remote method identifier used to build the service path.
    pub identifier: &'static str,
    /// Positional argument kinds.
    pub signature: &'static [ParamKind],
}

const fn op(
    name: &'static str,
    identifier: &'static str,
    signature: &'static [ParamKind],
) -> RemoteMethod {
    RemoteMethod {
        name,
        identifier,
        signature,
    }
}

const FORM_DATA: &[ParamKind] = &[Text, Object];
const DATA_ONLY: &[ParamKind] = &[Object];

// --- authentication

pub const LOGIN_BY_SIMPLE_PASSPORT: RemoteMethod = op(
    "loginBySimplePassport",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.LoginBySimplePassport",
    &[Text, Number],
);
pub const LOGIN_BY_SIMPLE_PASSPORT2: RemoteMethod = op(
    "loginBySimplePassport2",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.LoginBySimplePassport2",
    &[Text, Boolean, Number],
);
pub const VALIDATE_USER: RemoteMethod = op(
    "validateLogin",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.ValidateUser",
    &[Text, Text, Text, Number],
);
pub const VALIDATE_USER2: RemoteMethod = op(
    "validateLogin2",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.ValidateUser2",
    &[Text, Text, Text, Boolean, Number],
);
pub const LOGIN_BY_APP_SECRET: RemoteMethod = op(
    "loginByAppSecret",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.LoginByAppSecret",
    &[Text, Text, Text, Text, Number],
);
pub const LOGIN_BY_APP_SECRET2: RemoteMethod = op(
    "loginByAppSecret2",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.LoginByAppSecret2",
    &[Text, Text, Text, Text, Boolean, Number],
);
pub const LOGIN_BY_SIGN: RemoteMethod = op(
    "loginBySign",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.LoginBySign",
    &[Text, Text, Text, Text, Text, Number],
);
pub const LOGIN_BY_SIGN2: RemoteMethod = op(
    "loginBySign2",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.LoginBySign2",
    &[Text, Text, Text, Text, Text, Boolean, Number],
);
pub const LOGOUT: RemoteMethod = op(
    "logout",
    "Kingdee.BOS.WebApi.ServicesStub.AuthService.Logout",
    &[],
);
pub const GET_DATA_CENTER: RemoteMethod = op(
    "getDataCenter",
    "Kingdee.BOS.ServiceFacade.ServicesStub.Account.AccountService.GetDataCenterList",
    &[],
);

// --- business operations

pub const SAVE: RemoteMethod = op(
    "save",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.Save",
    FORM_DATA,
);
pub const BATCH_SAVE: RemoteMethod = op(
    "batchSave",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.BatchSave",
    FORM_DATA,
);
pub const FLEX_SAVE: RemoteMethod = op(
    "flexSave",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.FlexSave",
    FORM_DATA,
);
pub const DRAFT: RemoteMethod = op(
    "draft",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.Draft",
    FORM_DATA,
);
pub const SUBMIT: RemoteMethod = op(
    "submit",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.Submit",
    FORM_DATA,
);
pub const AUDIT: RemoteMethod = op(
    "audit",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.Audit",
    FORM_DATA,
);
pub const UN_AUDIT: RemoteMethod = op(
    "unAudit",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.UnAudit",
    FORM_DATA,
);
pub const VIEW: RemoteMethod = op(
    "view",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.View",
    FORM_DATA,
);
pub const DELETE: RemoteMethod = op(
    "delete",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.Delete",
    FORM_DATA,
);
pub const ALLOCATE: RemoteMethod = op(
    "allocate",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.Allocate",
    FORM_DATA,
);
// The server spells this identifier "Excute".
pub const EXECUTE_OPERATION: RemoteMethod = op(
    "executeOperation",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.ExcuteOperation",
    &[Text, Text, Object],
);
pub const EXECUTE_BILL_QUERY: RemoteMethod = op(
    "executeBillQuery",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.ExecuteBillQuery",
    DATA_ONLY,
);
pub const SEND_MSG: RemoteMethod = op(
    "sendMsg",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.SendMsg",
    DATA_ONLY,
);
pub const STATE_CONVERT: RemoteMethod = op(
    "stateConvert",
    "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService.StatusConvert",
    DATA_ONLY,
);

/// Every facade operation, looked up by name.
pub static OPERATIONS: &[RemoteMethod] = &[
    LOGIN_BY_SIMPLE_PASSPORT,
    LOGIN_BY_SIMPLE_PASSPORT2,
    VALIDATE_USER,
    VALIDATE_USER2,
    LOGIN_BY_APP_SECRET,
    LOGIN_BY_APP_SECRET2,
    LOGIN_BY_SIGN,
    LOGIN_BY_SIGN2,
    LOGOUT,
    GET_DATA_CENTER,
    SAVE,
    BATCH_SAVE,
    FLEX_SAVE,
    DRAFT,
    SUBMIT,
    AUDIT,
    UN_AUDIT,
    VIEW,
    DELETE,
    ALLOCATE,
    EXECUTE_OPERATION,
    EXECUTE_BILL_QUERY,
    SEND_MSG,
    STATE_CONVERT,
];

/// Find an operation by its facade name.
pub fn lookup(name: &str) -> Option<&'static RemoteMethod> {
    OPERATIONS.iter().find(|m| m.name == name)
}
