//! Ядро драйвера Oracle Call Interface для Rust
//! --------------------------------------------
//! Библиотека переносит типизированные данные Rust в хендлы OCI и обратно: связывает параметры выражений
//! (скаляры, массивы для пакетного DML, дескрипторы LOB/`ROWID`, экземпляры объектов), выясняет форму
//! результата запроса через выполнение в режиме описания, создает под нее типизированные буферы и
//! извлекает в них строки. Кроме того, метаданные базы (схемы, таблицы, столбцы) можно обходить как граф
//! объектов.
//!
//! Все обращения к нативной библиотеке идут через типаж [`ffi::Oci`][oci]. С возможностью `native` библиотека
//! линкуется с клиентом Oracle и предоставляет его реализацию [`NativeOci`][native].
//!
//! # Пример использования
//! ```ignore
//! use oci::Environment;
//! use oci::params::ConnectParams;
//! use oci::stmt::DataReader;
//! use oci::types::CreateMode;
//!
//! // Инициализируем клиентскую библиотеку Oracle
//! let env = Environment::new(CreateMode::default()).expect("Can't create ORACLE environment");
//! let params: ConnectParams = "scott/tiger@//localhost/orcl".parse().expect("Invalid connect string");
//! // Соединяемся с сервером
//! let conn = env.connect(params).expect("Can't connect to ORACLE database");
//! println!("Client version: {}", env.client_version().unwrap());
//! println!("Server version: {}", conn.server_version().unwrap());
//!
//! let mut stmt = conn.prepare("select ename from emp where deptno = :1").unwrap();
//! stmt.bind(1, &10).unwrap();
//! let mut reader = DataReader::new(&mut stmt);
//! reader.initialize_defines().unwrap();
//! while reader.read().unwrap() {
//!   let name: Option<String> = reader.get(0).unwrap();
//!   println!("{:?}", name);
//! }
//! ```
//!
//! [oci]: ffi/trait.Oci.html
//! [native]: ffi/native/struct.NativeOci.html

#![warn(missing_docs)]

use std::os::raw::c_uint;
use std::ptr;
#[cfg(feature = "native")]
use std::sync::Arc;

use log::{debug, warn};

pub mod convert;
pub mod describe;
pub mod error;
pub mod ffi;
pub mod metadata;
pub mod object;
pub mod params;
pub mod stmt;
pub mod types;
pub mod version;

/// Тип результата, возвращаемый всеми функциями библиотеки, которые могут привести к ошибке.
/// В большинстве случаев библиотека никогда не генерирует панику, всегда возвращая ошибочный
/// результат в виде ошибке. Немногочисленные исключения документированы особо, и существуют
/// потому, что внешнее по отношению к библиотеке API не позволяет вернуть ошибку (Например,
/// из реализации типажа [`Drop`][1]).
///
/// [1]: https://doc.rust-lang.org/std/ops/trait.Drop.html
pub type Result<T> = std::result::Result<T, error::Error>;

use crate::describe::Describe;
use crate::error::{DbError, Error};
use crate::ffi::{Api, AttrHolder, Env, ErrorHandle, Handle, Server};
use crate::ffi::{OCIEnv, OCISession, OCISvcCtx};
use crate::ffi::types::{Attr, CredentialMode};
use crate::object::ObjectType;
use crate::params::{ConnectParams, Credentials, InitParams};
use crate::stmt::Statement;
use crate::types::{AuthMode, ParameterType, Syntax};
use crate::version::Version;

//-------------------------------------------------------------------------------------------------
/// Окружение представляет собой менеджер соединений к базе. Окружение должно жить дольше всех
/// соединений, созданных в нем, за этим следит компилятор.
///
/// Окружение, созданное через `Default`, не инициализировано: его хендл нулевой, а любая операция
/// с ним возвращает ошибку [`Error::Init`][1].
///
/// [1]: error/enum.Error.html#variant.Init
#[derive(Debug, Default)]
pub struct Environment {
  /// Автоматически закрываемый враппер над низкоуровневыми функциями работы с окружением Oracle
  env: Option<Env>,
}
impl Environment {
  /// Создает окружение -- менеджер подключений к базе данных, работающий с клиентской библиотекой Oracle.
  /// Параметр `params` позволяет задать возможности, которые будут доступны при работе с базой данных,
  /// и наборы символов клиента.
  ///
  /// # OCI вызовы
  /// Осуществляет OCI вызов `OCIEnvNlsCreate()`. При разрушении объекта будет осуществлен OCI вызов
  /// `OCIHandleFree()`.
  #[cfg(feature = "native")]
  pub fn new<P: Into<InitParams>>(params: P) -> Result<Self> {
    Self::with_api(Arc::new(ffi::native::NativeOci), params)
  }
  /// Создает окружение, все нативные вызовы которого будут выполняться через `api`.
  pub fn with_api<P: Into<InitParams>>(api: Api, params: P) -> Result<Self> {
    let env = Env::new(api, &params.into())?;
    Ok(Environment { env: Some(env) })
  }
  /// Получает голый указатель на хендл окружения. Для неинициализированного окружения возвращает
  /// нулевой указатель.
  #[inline]
  pub fn handle(&self) -> *mut OCIEnv {
    self.env.as_ref().map_or(ptr::null_mut(), Env::native)
  }
  /// Возвращает версию клиентской библиотеки. Для получения версии сервера необходимо установить с ним
  /// соединение и воспользоваться вызовом [`ServiceContext::server_version()`][1].
  ///
  /// # Запросы к серверу (0)
  /// Данный вызов не требует общения с сервером.
  ///
  /// [1]: struct.ServiceContext.html#method.server_version
  pub fn client_version(&self) -> Result<Version> {
    Ok(self.env()?.api().client_version().into())
  }
  /// Осуществляет подключение к базе данных с указанными параметрами.
  ///
  /// # OCI вызовы
  /// Осуществляет OCI вызовы `OCIServerAttach()` и `OCISessionBegin()`. При разрушении объекта соединения
  /// будут осуществлены OCI вызовы `OCISessionEnd()` и `OCIServerDetach()`.
  ///
  /// # Запросы к серверу (2)
  /// Функция выполняет запросы к серверу при подключении и при открытии сессии. Столько же запросов
  /// будет совершено при уничтожении соединения.
  #[inline]
  pub fn connect<P: Into<ConnectParams>>(&self, params: P) -> Result<ServiceContext> {
    ServiceContext::new(self.env()?, &params.into())
  }
  fn env(&self) -> Result<&Env> {
    self.env.as_ref().ok_or(Error::Init(DbError::InvalidHandle))
  }
}
//-------------------------------------------------------------------------------------------------
/// Представляет соединение к базе данных, с определенным пользователем и паролем.
/// Соединение зависит от окружения, создавшего его, таким образом, окружение является менеджером
/// соединений.
///
/// # OCI вызовы
/// Объект соединения создается последовательными OCI вызовами `OCIServerAttach()` и `OCISessionBegin()`.
/// При разрушении объекта будет осуществлен сначала OCI вызов `OCISessionEnd()`, а затем `OCIServerDetach()`.
#[derive(Debug)]
pub struct ServiceContext<'e> {
  env: &'e Env,
  /// Хендл сервера, к которому будут направляться запросы.
  server: Server,
  /// Хендл, связывающий сервер и сессию пользователя. Передается во все функции, обращающиеся к серверу.
  context: Handle<OCISvcCtx>,
  /// Хендл, хранящий информацию о логине конкретного пользователя БД к конкретному серверу БД.
  session: Handle<OCISession>,
  /// Режим аутентификации, который использовался при создании соединения. Необходим при закрытии
  auth_mode: AuthMode,
  /// Хендл для приема ошибок от нативных вызовов оракла, сделанных в рамках данного соединения.
  error: ErrorHandle,
}
impl<'e> ServiceContext<'e> {
  fn new(env: &'e Env, params: &ConnectParams) -> Result<Self> {
    let error: ErrorHandle = Handle::new(env)?;
    let dblink = if params.dblink.is_empty() { None } else { Some(params.dblink.as_str()) };
    let mut server = Server::attach(env, &error, dblink, params.attach_mode)?;

    match Self::login(env, &error, &server, params) {
      Ok((context, session)) => {
        debug!("session started for {:?}", params.credentials);
        Ok(ServiceContext {
          env: env,
          server: server,
          context: context,
          session: session,
          auth_mode: params.auth_mode,
          error: error,
        })
      },
      Err(e) => {
        // Сервер не отключается сам при разрушении
        if let Err(e) = server.detach(&error) {
          warn!("{}", e);
        }
        Err(e)
      }
    }
  }
  fn login(env: &Env, error: &ErrorHandle, server: &Server, params: &ConnectParams) -> Result<(Handle<OCISvcCtx>, Handle<OCISession>)> {
    let context: Handle<OCISvcCtx > = Handle::new(env)?;
    let session: Handle<OCISession> = Handle::new(env)?;

    let cred_mode = match params.credentials {
      Credentials::Rdbms { ref username, ref password } => {
        // Ассоциируем имя пользователя и пароль с сессией.
        session.set_str(username, Attr::Username, error)?;
        session.set_str(password, Attr::Password, error)?;
        CredentialMode::Rdbms
      },
      Credentials::Ext => CredentialMode::Ext,
    };

    // Ассоциируем сервер с контекстом и осуществляем подключение
    context.set_handle(server.handle(), Attr::Server, error)?;
    let res = unsafe {
      env.api().session_begin(
        context.native_mut(),
        error.native_mut(),
        session.native_mut(),
        cred_mode as c_uint,
        params.auth_mode as c_uint
      )
    };
    error.check(res)?;
    context.set_handle(&session, Attr::Session, error)?;
    Ok((context, session))
  }
  /// Получает хендл для записи ошибок во время общения с базой данных в рамках данного соединения.
  #[inline]
  pub fn error(&self) -> &ErrorHandle {
    &self.error
  }
  /// Окружение, в котором создано соединение.
  #[inline]
  pub fn env(&self) -> &'e Env {
    self.env
  }
  /// Голый указатель на хендл контекста сервиса для передачи в нативные функции.
  #[inline]
  pub fn handle(&self) -> *mut OCISvcCtx {
    self.context.native_mut()
  }
  /// Проверяет, что соединение имеет действительный хендл контекста сервиса.
  #[inline]
  pub fn is_valid(&self) -> bool {
    !self.context.native_mut().is_null()
  }
  /// Возвращает версию сервера Oracle-а, к которому подключен клиент.
  ///
  /// # Запросы к серверу (1)
  /// Функция выполняет один запрос к серверу при каждом вызове.
  pub fn server_version(&self) -> Result<Version> {
    self.server.version(&self.error).map(|(v, _)| v)
  }
  /// Возвращает строку с описанием сервера, например, `Oracle Database 12c Enterprise Edition ...`.
  ///
  /// # Запросы к серверу (1)
  /// Функция выполняет один запрос к серверу при каждом вызове.
  pub fn server_banner(&self) -> Result<String> {
    self.server.version(&self.error).map(|(_, banner)| banner)
  }
  /// Осуществляет разбор SQL-выражения и создает подготовленное выражение. Выражение использует родной
  /// для сервера базы данных синтаксис разбора запросов.
  ///
  /// Возвращаемый объект выражения живет не дольше соединения, его породившего.
  ///
  /// # OCI вызовы
  /// Объект выражения создается OCI вызовом `OCIStmtPrepare2()`. При разрушении объекта будет осуществлен
  /// OCI вызов `OCIStmtRelease()`.
  ///
  /// # Запросы к серверу (0)
  /// Функция не выполняет запросов к серверу, разбор и подготовка запроса выполняются локально.
  #[inline]
  pub fn prepare(&self, sql: &str) -> Result<Statement> {
    self.prepare_with_syntax(Syntax::default(), sql)
  }
  /// Осуществляет разбор SQL-выражения с использованием указанного синтаксиса сервера базы данных.
  pub fn prepare_with_syntax(&self, syntax: Syntax, sql: &str) -> Result<Statement> {
    let mut stmt = Statement::new(self);
    stmt.prepare_with_syntax(syntax, sql)?;
    Ok(stmt)
  }
  /// Создает еще не подготовленное выражение. Перед выполнением его необходимо подготовить методом
  /// [`Statement::prepare()`][1].
  ///
  /// [1]: stmt/struct.Statement.html#method.prepare
  #[inline]
  pub fn statement(&self) -> Statement {
    Statement::new(self)
  }
  /// Получает описание объекта базы данных с указанным именем.
  ///
  /// # Параметры
  /// - name:
  ///   Имя объекта, возможно, с указанием схемы через точку
  /// - ptype:
  ///   Ожидаемый вид объекта. `ParameterType::Unknown` позволяет описать объект любого вида
  /// - case_sensitive:
  ///   Если `true`, каждая часть имени берется в кавычки и регистр сохраняется. Иначе сервер
  ///   приводит имя к верхнему регистру
  ///
  /// # Запросы к серверу (1)
  /// Функция выполняет один запрос к серверу при каждом вызове.
  pub fn describe(&self, name: &str, ptype: ParameterType, case_sensitive: bool) -> Result<Describe> {
    Describe::new(self, name, ptype, case_sensitive)
  }
  /// Получает описание пользовательского типа из кеша объектов, при необходимости загружая его с сервера.
  pub fn type_by_name(&self, schema: &str, name: &str) -> Result<ObjectType> {
    ObjectType::by_name(self, schema, name)
  }
  /// Фиксирует текущую транзакцию.
  ///
  /// # Запросы к серверу (1)
  pub fn commit(&self) -> Result<()> {
    let res = unsafe {
      self.env.api().trans_commit(self.context.native_mut(), self.error.native_mut(), 0)
    };
    self.error.check(res).map(|_| ())
  }
  /// Откатывает текущую транзакцию.
  ///
  /// # Запросы к серверу (1)
  pub fn rollback(&self) -> Result<()> {
    let res = unsafe {
      self.env.api().trans_rollback(self.context.native_mut(), self.error.native_mut(), 0)
    };
    self.error.check(res).map(|_| ())
  }
  /// Реализация нативного интерфейса, через которую работает соединение.
  #[inline]
  pub(crate) fn api(&self) -> &Api {
    self.env.api()
  }
}
impl<'e> Drop for ServiceContext<'e> {
  fn drop(&mut self) {
    let res = unsafe {
      self.env.api().session_end(
        self.context.native_mut(),
        self.error.native_mut(),
        self.session.native_mut(),
        self.auth_mode as c_uint
      )
    };
    if let Err(e) = self.error.check(res) {
      warn!("OCISessionEnd: {}", e);
    }
    if let Err(e) = self.server.detach(&self.error) {
      warn!("OCIServerDetach: {}", e);
    }
  }
}
