//! Содержит структуры, описывающие параметры инициализации окружения и подключения к базе данных
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{AttachMode, AuthMode, Charset, CreateMode};

/// Параметры инициализации менеджера подключений к базе данных.
#[derive(Clone, Debug, Default)]
pub struct InitParams {
  /// Возможности, которые будут доступны при работе с базой данных.
  pub mode: CreateMode,
  /// The client-side character set for the current environment handle. If it is 0, the `NLS_LANG`
  /// setting is used. `OCI_UTF16ID` is a valid setting; it is used by the metadata and the `CHAR` data.
  pub charset: Charset,
  /// The client-side national character set for the current environment handle. If it is `0`,
  /// `NLS_NCHAR` setting is used. `OCI_UTF16ID` is a valid setting; it is used by the `NCHAR` data.
  pub ncharset: Charset,
}
impl From<CreateMode> for InitParams {
  /// Преобразует режим инициализации менеджера подключений в параметры менеджера подключений, в качестве
  /// режима используя собственное значение и оставляя остальные параметры по умолчанию.
  fn from(mode: CreateMode) -> InitParams {
    InitParams { mode: mode, ..Default::default() }
  }
}
/// Содержит учетные данные пользователя, которые должны использоваться для аутентификации в базе.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
  /// База будет проводить аутентификацию по паре пользователь/пароль.
  Rdbms {
    /// Имя пользователя, под которым установить соединение к базе данных
    username: String,
    /// Пароль пользователя, под которым установить соединение к базе данных
    password: String,
  },
  /// База будет проводить аутентификацию, используя внешние учетные данные.
  /// Подключение всегда идет на локальной машине.
  Ext,
}
impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    // Пароль не должен попадать в логи
    match *self {
      Credentials::Rdbms { ref username, .. } => f.debug_struct("Rdbms").field("username", username).finish(),
      Credentials::Ext => f.write_str("Ext"),
    }
  }
}
/// Параметры подключения к базе данных
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectParams {
  /// Адрес базы и указатель сервиса, к которому следует подключиться.
  /// В случае внешней аутентификации не требуется, т.к. база всегда запущена на той же машине
  pub dblink: String,
  /// Режим создания соединений -- обычный или с использованием пула соединений.
  pub attach_mode: AttachMode,
  /// Учетные данные, используемые для логина в базу
  pub credentials: Credentials,
  /// Режим аутентификации, позволяющий задать дополнительные привилегии при подключении к базе данных.
  pub auth_mode: AuthMode,
}

/// Ошибка разбора строки подключения.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseParamsError {
  /// Указано имя пользователя, но не указан пароль (`user@db` вместо `user/password@db`).
  #[error("password is not specified for user `{0}`")]
  NoPassword(String),
  /// Указан пароль, но не указано имя пользователя (`/password@db`).
  #[error("username is not specified")]
  NoUsername,
  /// Неизвестная привилегия после ` as `.
  #[error("unknown privilege `{0}`")]
  Privilege(String),
}

impl FromStr for ConnectParams {
  type Err = ParseParamsError;
  /// Разбирает строку подключения в формате SQL*Plus: `[user/password][@dblink][ as sysdba|sysoper]`.
  /// Строка без имени пользователя (`/` или `/@dblink`) означает внешнюю аутентификацию.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    let (s, auth_mode) = match lower.rfind(" as ") {
      Some(pos) => {
        let mode = match lower[pos + 4..].trim() {
          "sysdba" => AuthMode::SysDba,
          "sysoper" => AuthMode::SysOper,
          p => return Err(ParseParamsError::Privilege(p.to_owned())),
        };
        (s[..pos].trim_end(), mode)
      },
      None => (s, AuthMode::default()),
    };
    let (login, dblink) = match s.find('@') {
      Some(pos) => (&s[..pos], &s[pos + 1..]),
      None => (s, ""),
    };
    let credentials = match login.find('/') {
      Some(0) if login.len() == 1 => Credentials::Ext,
      Some(0) => return Err(ParseParamsError::NoUsername),
      Some(pos) => Credentials::Rdbms { username: login[..pos].to_owned(), password: login[pos + 1..].to_owned() },
      None if login.is_empty() => Credentials::Ext,
      None => return Err(ParseParamsError::NoPassword(login.to_owned())),
    };
    Ok(ConnectParams {
      dblink: dblink.to_owned(),
      attach_mode: AttachMode::default(),
      credentials: credentials,
      auth_mode: auth_mode,
    })
  }
}
