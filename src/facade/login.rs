//! Login request variants.
//!
//! Callers build a [`LoginRequest`] with named fields; the positional,
//! arity-sniffing form survives only in [`LoginRequest::from_args`], which
//! implements the compatibility table:
//!
//! | args | variant |
//! |---|---|
//! | 2 | simple passport |
//! | 3 | simple passport + kick-off |
//! | 4 | credentials |
//! | 5 | app secret |
//! | 6 | app secret + kick-off when the 5th argument is a boolean, signature otherwise |
//! | 7 | signature + kick-off |

use serde_json::{json, Value};

use super::operations::{
    RemoteMethod, LOGIN_BY_APP_SECRET, LOGIN_BY_APP_SECRET2, LOGIN_BY_SIGN, LOGIN_BY_SIGN2,
    LOGIN_BY_SIMPLE_PASSPORT, LOGIN_BY_SIMPLE_PASSPORT2, VALIDATE_USER, VALIDATE_USER2,
};
use super::signature;
use crate::{Result, RpcError};

/// Locale id for Simplified Chinese, used when the caller gives none.
///
/// Other common values: 1033 (English), 3076 (Traditional Chinese).
pub const DEFAULT_LCID: i64 = 2052;

const LOGIN: &str = "login";

/// One of the server's login forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRequest {
    /// Base64 passport.
    SimplePassport { passport: String, lcid: i64 },

    SimplePassportKickOff {
        passport: String,
        kick_off: bool,
        lcid: i64,
    },

    /// Data center id, user name and password.
    Credentials {
        db_id: String,
        user_name: String,
        password: String,
        lcid: i64,
    },

    CredentialsKickOff {
        db_id: String,
        user_name: String,
        password: String,
        kick_off: bool,
        lcid: i64,
    },

    /// Third-party application id and secret.
    AppSecret {
        db_id: String,
        user_name: String,
        app_id: String,
        app_secret: String,
        lcid: i64,
    },

    AppSecretKickOff {
        db_id: String,
        user_name: String,
        app_id: String,
        app_secret: String,
        kick_off: bool,
        lcid: i64,
    },

    /// Application id with a timestamp signature.
    Signature {
        db_id: String,
        user_name: String,
        app_id: String,
        timestamp: String,
        sign: String,
        lcid: i64,
    },

    SignatureKickOff {
        db_id: String,
        user_name: String,
        app_id: String,
        timestamp: String,
        sign: String,
        kick_off: bool,
        lcid: i64,
    },
}

impl LoginRequest {
    // ---

    pub fn simple_passport(passport: impl Into<String>) -> Self {
        Self::SimplePassport {
            passport: passport.into(),
            lcid: DEFAULT_LCID,
        }
    }

    pub fn credentials(
        db_id: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::Credentials {
            db_id: db_id.into(),
            user_name: user_name.into(),
            password: password.into(),
            lcid: DEFAULT_LCID,
        }
    }

    pub fn app_secret(
        db_id: impl Into<String>,
        user_name: impl Into<String>,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self::AppSecret {
            db_id: db_id.into(),
            user_name: user_name.into(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            lcid: DEFAULT_LCID,
        }
    }

    pub fn signature(
        db_id: impl Into<String>,
        user_name: impl Into<String>,
        app_id: impl Into<String>,
        timestamp: impl Into<String>,
        sign: impl Into<String>,
    ) -> Self {
        Self::Signature {
            db_id: db_id.into(),
            user_name: user_name.into(),
            app_id: app_id.into(),
            timestamp: timestamp.into(),
            sign: sign.into(),
            lcid: DEFAULT_LCID,
        }
    }

    /// Switch to the kick-off form of this login, or update its flag.
    ///
    /// With `kick_off` set the server ends other sessions of the same user.
    #[must_use]
    pub fn kick_off(self, kick_off: bool) -> Self {
        // ---
        match self {
            Self::SimplePassport { passport, lcid }
            | Self::SimplePassportKickOff { passport, lcid, .. } => Self::SimplePassportKickOff {
                passport,
                kick_off,
                lcid,
            },
            Self::Credentials {
                db_id,
                user_name,
                password,
                lcid,
            }
            | Self::CredentialsKickOff {
                db_id,
                user_name,
                password,
                lcid,
                ..
            } => Self::CredentialsKickOff {
                db_id,
                user_name,
                password,
                kick_off,
                lcid,
            },
            Self::AppSecret {
                db_id,
                user_name,
                app_id,
                app_secret,
                lcid,
            }
            | Self::AppSecretKickOff {
                db_id,
                user_name,
                app_id,
                app_secret,
                lcid,
                ..
            } => Self::AppSecretKickOff {
                db_id,
                user_name,
                app_id,
                app_secret,
                kick_off,
                lcid,
            },
            Self::Signature {
                db_id,
                user_name,
                app_id,
                timestamp,
                sign,
                lcid,
            }
            | Self::SignatureKickOff {
                db_id,
                user_name,
                app_id,
                timestamp,
                sign,
                lcid,
                ..
            } => Self::SignatureKickOff {
                db_id,
                user_name,
                app_id,
                timestamp,
                sign,
                kick_off,
                lcid,
            },
        }
    }

    /// Replace the locale id.
    #[must_use]
    pub fn with_lcid(mut self, new_lcid: i64) -> Self {
        // ---
        match &mut self {
            Self::SimplePassport { lcid, .. }
            | Self::SimplePassportKickOff { lcid, .. }
            | Self::Credentials { lcid, .. }
            | Self::CredentialsKickOff { lcid, .. }
            | Self::AppSecret { lcid, .. }
            | Self::AppSecretKickOff { lcid, .. }
            | Self::Signature { lcid, .. }
            | Self::SignatureKickOff { lcid, .. } => *lcid = new_lcid,
        }
        self
    }

    /// Remote method this login forwards to.
    pub fn method(&self) -> &'static RemoteMethod {
        // ---
        match self {
            Self::SimplePassport { .. } => &LOGIN_BY_SIMPLE_PASSPORT,
            Self::SimplePassportKickOff { .. } => &LOGIN_BY_SIMPLE_PASSPORT2,
            Self::Credentials { .. } => &VALIDATE_USER,
            Self::CredentialsKickOff { .. } => &VALIDATE_USER2,
            Self::AppSecret { .. } => &LOGIN_BY_APP_SECRET,
            Self::AppSecretKickOff { .. } => &LOGIN_BY_APP_SECRET2,
            Self::Signature { .. } => &LOGIN_BY_SIGN,
            Self::SignatureKickOff { .. } => &LOGIN_BY_SIGN2,
        }
    }

    /// Positional parameters in the order the remote method declares them.
    pub fn to_parameters(&self) -> Vec<Value> {
        // ---
        match self {
            Self::SimplePassport { passport, lcid } => vec![json!(passport), json!(lcid)],
            Self::SimplePassportKickOff {
                passport,
                kick_off,
                lcid,
            } => vec![json!(passport), json!(kick_off), json!(lcid)],
            Self::Credentials {
                db_id,
                user_name,
                password,
                lcid,
            } => vec![json!(db_id), json!(user_name), json!(password), json!(lcid)],
            Self::CredentialsKickOff {
                db_id,
                user_name,
                password,
                kick_off,
                lcid,
            } => vec![
                json!(db_id),
                json!(user_name),
                json!(password),
                json!(kick_off),
                json!(lcid),
            ],
            Self::AppSecret {
                db_id,
                user_name,
                app_id,
                app_secret,
                lcid,
            } => vec![
                json!(db_id),
                json!(user_name),
                json!(app_id),
                json!(app_secret),
                json!(lcid),
            ],
            Self::AppSecretKickOff {
                db_id,
                user_name,
                app_id,
                app_secret,
                kick_off,
                lcid,
            } => vec![
                json!(db_id),
                json!(user_name),
                json!(app_id),
                json!(app_secret),
                json!(kick_off),
                json!(lcid),
            ],
            Self::Signature {
                db_id,
                user_name,
                app_id,
                timestamp,
                sign,
                lcid,
            } => vec![
                json!(db_id),
                json!(user_name),
                json!(app_id),
                json!(timestamp),
                json!(sign),
                json!(lcid),
            ],
            Self::SignatureKickOff {
                db_id,
                user_name,
                app_id,
                timestamp,
                sign,
                kick_off,
                lcid,
            } => vec![
                json!(db_id),
                json!(user_name),
                json!(app_id),
                json!(timestamp),
                json!(sign),
                json!(kick_off),
                json!(lcid),
            ],
        }
    }

    /// Resolve a positional argument list into a login request.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Contract` when no login form takes this many
    /// arguments, when an argument has the wrong kind for the resolved form,
    /// or when the locale id is not an integer.
    pub fn from_args(args: Vec<Value>) -> Result<Self> {
        // ---
        let method = resolve(&args)?;
        signature::check(method, &args)?;

        let arity = args.len();
        let mut a = Args(args.into_iter());

        let request = match arity {
            2 => Self::SimplePassport {
                passport: a.text()?,
                lcid: a.lcid()?,
            },
            3 => Self::SimplePassportKickOff {
                passport: a.text()?,
                kick_off: a.flag()?,
                lcid: a.lcid()?,
            },
            4 => Self::Credentials {
                db_id: a.text()?,
                user_name: a.text()?,
                password: a.text()?,
                lcid: a.lcid()?,
            },
            5 => Self::AppSecret {
                db_id: a.text()?,
                user_name: a.text()?,
                app_id: a.text()?,
                app_secret: a.text()?,
                lcid: a.lcid()?,
            },
            6 if *method == LOGIN_BY_APP_SECRET2 => Self::AppSecretKickOff {
                db_id: a.text()?,
                user_name: a.text()?,
                app_id: a.text()?,
                app_secret: a.text()?,
                kick_off: a.flag()?,
                lcid: a.lcid()?,
            },
            6 => Self::Signature {
                db_id: a.text()?,
                user_name: a.text()?,
                app_id: a.text()?,
                timestamp: a.text()?,
                sign: a.text()?,
                lcid: a.lcid()?,
            },
            _ => Self::SignatureKickOff {
                db_id: a.text()?,
                user_name: a.text()?,
                app_id: a.text()?,
                timestamp: a.text()?,
                sign: a.text()?,
                kick_off: a.flag()?,
                lcid: a.lcid()?,
            },
        };

        Ok(request)
    }
}

/// Pick the login form for a positional argument list.
///
/// # Errors
///
/// Returns `RpcError::Contract` for an argument count outside 2..=7.
pub fn resolve(args: &[Value]) -> Result<&'static RemoteMethod> {
    // ---
    match args.len() {
        2 => Ok(&LOGIN_BY_SIMPLE_PASSPORT),
        3 => Ok(&LOGIN_BY_SIMPLE_PASSPORT2),
        4 => Ok(&VALIDATE_USER),
        5 => Ok(&LOGIN_BY_APP_SECRET),
        6 if args[4].is_boolean() => Ok(&LOGIN_BY_APP_SECRET2),
        6 => Ok(&LOGIN_BY_SIGN),
        7 => Ok(&LOGIN_BY_SIGN2),
        n => Err(RpcError::contract(
            LOGIN,
            format!("no login form takes {n} argument(s)"),
        )),
    }
}

/// Sequential reader over already signature-checked arguments.
struct Args(std::vec::IntoIter<Value>);

impl Args {
    fn text(&mut self) -> Result<String> {
        match self.0.next() {
            Some(Value::String(s)) => Ok(s),
            _ => Err(RpcError::contract(LOGIN, "expected a string argument")),
        }
    }

    fn flag(&mut self) -> Result<bool> {
        match self.0.next() {
            Some(Value::Bool(b)) => Ok(b),
            _ => Err(RpcError::contract(LOGIN, "expected a boolean argument")),
        }
    }

    fn lcid(&mut self) -> Result<i64> {
        self.0
            .next()
            .and_then(|v| v.as_i64())
            .ok_or_else(|| RpcError::contract(LOGIN, "lcid must be an integer"))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn args(values: &[Value]) -> Vec<Value> {
        values.to_vec()
    }

    #[test]
    fn test_every_arity_resolves_to_one_form() {
        // ---
        let cases: Vec<(Vec<Value>, &RemoteMethod)> = vec![
            (args(&[json!("cGFzcw=="), json!(2052)]), &LOGIN_BY_SIMPLE_PASSPORT),
            (
                args(&[json!("cGFzcw=="), json!(true), json!(2052)]),
                &LOGIN_BY_SIMPLE_PASSPORT2,
            ),
            (
                args(&[json!("AA"), json!("bob"), json!("pw"), json!(2052)]),
                &VALIDATE_USER,
            ),
            (
                args(&[json!("AA"), json!("bob"), json!("app"), json!("secret"), json!(2052)]),
                &LOGIN_BY_APP_SECRET,
            ),
            (
                args(&[
                    json!("AA"),
                    json!("bob"),
                    json!("app"),
                    json!("secret"),
                    json!(false),
                    json!(2052),
                ]),
                &LOGIN_BY_APP_SECRET2,
            ),
            (
                args(&[
                    json!("AA"),
                    json!("bob"),
                    json!("app"),
                    json!("1718000000"),
                    json!("c2lnbg=="),
                    json!(2052),
                ]),
                &LOGIN_BY_SIGN,
            ),
            (
                args(&[
                    json!("AA"),
                    json!("bob"),
                    json!("app"),
                    json!("1718000000"),
                    json!("c2lnbg=="),
                    json!(true),
                    json!(2052),
                ]),
                &LOGIN_BY_SIGN2,
            ),
        ];

        for (input, expected) in cases {
            let request = LoginRequest::from_args(input.clone()).unwrap();
            assert_eq!(request.method(), expected);
            assert_eq!(request.to_parameters(), input);
        }
    }

    #[test]
    fn test_arity_six_disambiguates_on_fifth_argument() {
        // ---
        for flag in [true, false] {
            let six = args(&[json!("a"), json!("b"), json!("c"), json!("d"), json!(flag), json!(1)]);
            assert_eq!(resolve(&six).unwrap(), &LOGIN_BY_APP_SECRET2);
        }

        for fifth in [json!("sign"), json!(5), json!({}), Value::Null] {
            let six = args(&[json!("a"), json!("b"), json!("c"), json!("d"), fifth, json!(1)]);
            assert_eq!(resolve(&six).unwrap(), &LOGIN_BY_SIGN);
        }
    }

    #[test]
    fn test_unsupported_arity() {
        // ---
        for n in [0usize, 1, 8] {
            let input = vec![json!("x"); n];
            let err = LoginRequest::from_args(input).unwrap_err();
            assert!(matches!(err, RpcError::Contract { operation: "login", .. }));
        }
    }

    #[test]
    fn test_wrong_kinds_are_rejected() {
        // ---
        let err = LoginRequest::from_args(args(&[json!("AA"), json!("bob"), json!("pw"), json!("2052")]))
            .unwrap_err();
        assert!(matches!(err, RpcError::Contract { operation: "validateLogin", .. }));

        // Non-boolean 5th argument selects the signature form, which needs a string there.
        let err = LoginRequest::from_args(args(&[
            json!("AA"),
            json!("bob"),
            json!("app"),
            json!("ts"),
            json!(1),
            json!(2052),
        ]))
        .unwrap_err();
        assert!(matches!(err, RpcError::Contract { operation: "loginBySign", .. }));
    }

    #[test]
    fn test_fractional_lcid_is_rejected() {
        // ---
        let err = LoginRequest::from_args(args(&[json!("cGFzcw=="), json!(2052.5)])).unwrap_err();
        assert!(matches!(err, RpcError::Contract { ref detail, .. } if detail.contains("lcid")));
    }

    #[test]
    fn test_constructors_default_lcid() {
        // ---
        let request = LoginRequest::credentials("AA", "bob", "pw");
        assert_eq!(
            request.to_parameters(),
            vec![json!("AA"), json!("bob"), json!("pw"), json!(DEFAULT_LCID)]
        );

        let english = request.with_lcid(1033);
        assert_eq!(english.to_parameters()[3], json!(1033));
    }

    #[test]
    fn test_kick_off_switches_form() {
        // ---
        let request = LoginRequest::credentials("AA", "bob", "pw").kick_off(true);
        assert_eq!(request.method(), &VALIDATE_USER2);
        assert_eq!(
            request.to_parameters(),
            vec![json!("AA"), json!("bob"), json!("pw"), json!(true), json!(2052)]
        );

        let passport = LoginRequest::simple_passport("cGFzcw==").kick_off(false);
        assert_eq!(passport.method(), &LOGIN_BY_SIMPLE_PASSPORT2);

        let sign = LoginRequest::signature("AA", "bob", "app", "ts", "sig")
            .with_lcid(3076)
            .kick_off(true);
        assert_eq!(sign.method(), &LOGIN_BY_SIGN2);
        assert_eq!(sign.to_parameters()[6], json!(3076));

        let secret = LoginRequest::app_secret("AA", "bob", "app", "secret").kick_off(true);
        assert_eq!(secret.method(), &LOGIN_BY_APP_SECRET2);
    }
}
