//! Типаж, через который библиотека обращается к нативному интерфейсу Oracle Call Interface.
//!
//! Каждый метод соответствует одной нативной функции OCI и имеет ту же семантику параметров. Все методы
//! возвращают код возврата нативной функции, который вызывающая сторона обязана проверить до использования
//! выходных параметров. Настоящая реализация, линкуемая с клиентской библиотекой Oracle, находится в
//! модуле `native` и доступна с возможностью `native`.

use std::fmt;
use std::os::raw::{c_int, c_uchar, c_uint, c_ushort, c_void};

use super::{OCIBind, OCIDefine, OCIDescribe, OCIEnv, OCIError, OCIRowid, OCIServer, OCISession, OCIStmt, OCISvcCtx, OCIType};

/// Нативный интерфейс Oracle Call Interface. Реализации должны быть потокобезопасными, т.к. окружение
/// разделяется между потоками.
pub trait Oci : fmt::Debug + Send + Sync {
  /// `OCIEnvNlsCreate()`: создает окружение в указанном режиме и с указанными наборами символов.
  unsafe fn env_create(&self, envhpp: *mut *mut OCIEnv, mode: c_uint, charset: c_ushort, ncharset: c_ushort) -> c_int;

  /// `OCIHandleAlloc()`
  unsafe fn handle_alloc(&self, parenth: *const c_void, hndlpp: *mut *mut c_void, htype: c_uint) -> c_int;
  /// `OCIHandleFree()`
  unsafe fn handle_free(&self, hndlp: *mut c_void, htype: c_uint) -> c_int;
  /// `OCIDescriptorAlloc()`
  unsafe fn descriptor_alloc(&self, parenth: *const c_void, descpp: *mut *mut c_void, dtype: c_uint) -> c_int;
  /// `OCIDescriptorFree()`
  unsafe fn descriptor_free(&self, descp: *mut c_void, dtype: c_uint) -> c_int;
  /// `OCIArrayDescriptorAlloc()`: выделяет `array_size` дескрипторов одним вызовом. Указатели на них записываются
  /// в массив `descpp`.
  unsafe fn array_descriptor_alloc(&self, parenth: *const c_void, descpp: *mut *mut c_void, dtype: c_uint, array_size: c_uint) -> c_int;
  /// `OCIArrayDescriptorFree()`
  unsafe fn array_descriptor_free(&self, descpp: *mut *mut c_void, dtype: c_uint) -> c_int;

  /// `OCIErrorGet()`: получает диагностическую запись с номером `recordno` (нумерация с 1).
  unsafe fn error_get(&self, hndlp: *mut c_void, recordno: c_uint, errcodep: *mut c_int, bufp: *mut c_uchar, bufsiz: c_uint, htype: c_uint) -> c_int;

  /// `OCIServerAttach()`
  unsafe fn server_attach(&self, srvhp: *mut OCIServer, errhp: *mut OCIError, dblink: *const c_uchar, dblink_len: c_int, mode: c_uint) -> c_int;
  /// `OCIServerDetach()`
  unsafe fn server_detach(&self, srvhp: *mut OCIServer, errhp: *mut OCIError, mode: c_uint) -> c_int;
  /// `OCISessionBegin()`
  unsafe fn session_begin(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, usrhp: *mut OCISession, credt: c_uint, mode: c_uint) -> c_int;
  /// `OCISessionEnd()`
  unsafe fn session_end(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, usrhp: *mut OCISession, mode: c_uint) -> c_int;
  /// `OCITransCommit()`
  unsafe fn trans_commit(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, flags: c_uint) -> c_int;
  /// `OCITransRollback()`
  unsafe fn trans_rollback(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, flags: c_uint) -> c_int;

  /// `OCIStmtPrepare2()`
  unsafe fn stmt_prepare(&self, svchp: *mut OCISvcCtx, stmtp: *mut *mut OCIStmt, errhp: *mut OCIError,
                         stmt: *const c_uchar, stmt_len: c_uint,
                         key: *const c_uchar, key_len: c_uint,
                         language: c_uint, mode: c_uint) -> c_int;
  /// `OCIStmtRelease()`
  unsafe fn stmt_release(&self, stmtp: *mut OCIStmt, errhp: *mut OCIError, key: *const c_uchar, key_len: c_uint, mode: c_uint) -> c_int;
  /// `OCIStmtExecute()`
  unsafe fn stmt_execute(&self, svchp: *mut OCISvcCtx, stmtp: *mut OCIStmt, errhp: *mut OCIError, iters: c_uint, rowoff: c_uint, mode: c_uint) -> c_int;
  /// `OCIStmtFetch2()`
  unsafe fn stmt_fetch(&self, stmtp: *mut OCIStmt, errhp: *mut OCIError, nrows: c_uint, orientation: c_ushort, fetch_offset: c_int, mode: c_uint) -> c_int;

  /// `OCIBindByPos2()`
  unsafe fn bind_by_pos(&self, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, errhp: *mut OCIError,
                        position: c_uint,
                        valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                        indp: *mut c_void, alenp: *mut u32, rcodep: *mut c_ushort,
                        maxarr_len: c_uint, curelep: *mut c_uint, mode: c_uint) -> c_int;
  /// `OCIBindByName2()`
  unsafe fn bind_by_name(&self, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, errhp: *mut OCIError,
                         placeholder: *const c_uchar, placeh_len: c_int,
                         valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                         indp: *mut c_void, alenp: *mut u32, rcodep: *mut c_ushort,
                         maxarr_len: c_uint, curelep: *mut c_uint, mode: c_uint) -> c_int;
  /// `OCIBindObject()`
  unsafe fn bind_object(&self, bindp: *mut OCIBind, errhp: *mut OCIError, tdo: *const OCIType,
                        pgvpp: *mut *mut c_void, pvszsp: *mut c_uint,
                        indpp: *mut *mut c_void, indszp: *mut c_uint) -> c_int;
  /// `OCIDefineByPos2()`
  unsafe fn define_by_pos(&self, stmtp: *mut OCIStmt, defnpp: *mut *mut OCIDefine, errhp: *mut OCIError,
                          position: c_uint,
                          valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                          indp: *mut c_void, rlenp: *mut u32, rcodep: *mut c_ushort,
                          mode: c_uint) -> c_int;
  /// `OCIDefineObject()`
  unsafe fn define_object(&self, defnp: *mut OCIDefine, errhp: *mut OCIError, tdo: *const OCIType,
                          pgvpp: *mut *mut c_void, pvszsp: *mut c_uint,
                          indpp: *mut *mut c_void, indszp: *mut c_uint) -> c_int;

  /// `OCIParamGet()`: возвращает дескриптор параметра, принадлежащий хендлу `hndlp`. Освобождать его нельзя.
  unsafe fn param_get(&self, hndlp: *const c_void, htype: c_uint, errhp: *mut OCIError, parmdpp: *mut *mut c_void, pos: c_uint) -> c_int;
  /// `OCIAttrGet()`
  unsafe fn attr_get(&self, trgthndlp: *const c_void, trghndltyp: c_uint,
                     attributep: *mut c_void, sizep: *mut c_uint,
                     attrtype: c_uint, errhp: *mut OCIError) -> c_int;
  /// `OCIAttrSet()`
  unsafe fn attr_set(&self, trgthndlp: *mut c_void, trghndltyp: c_uint,
                     attributep: *mut c_void, size: c_uint,
                     attrtype: c_uint, errhp: *mut OCIError) -> c_int;
  /// `OCIDescribeAny()`
  unsafe fn describe_any(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError,
                         objptr: *mut c_void, objnm_len: c_uint, objptr_typ: c_uchar,
                         info_level: c_uchar, objtyp: c_uchar, dschp: *mut OCIDescribe) -> c_int;
  /// `OCITypeByName()`
  unsafe fn type_by_name(&self, envhp: *mut OCIEnv, errhp: *mut OCIError, svchp: *const OCISvcCtx,
                         schema_name: *const c_uchar, s_length: c_uint,
                         type_name: *const c_uchar, t_length: c_uint,
                         pin_duration: c_ushort, get_option: c_uint,
                         tdo: *mut *mut OCIType) -> c_int;
  /// `OCIRowidToChar()`
  unsafe fn rowid_to_char(&self, rowid: *mut OCIRowid, outbfp: *mut c_uchar, outbflp: *mut c_ushort, errhp: *mut OCIError) -> c_int;
  /// `OCIServerRelease()`
  unsafe fn server_release(&self, hndlp: *mut c_void, errhp: *mut OCIError, bufp: *mut c_uchar, bufsz: c_uint, hndltype: c_uchar, version: *mut c_uint) -> c_int;
  /// `OCIClientVersion()`: версия клиентской библиотеки в виде `(major, minor, update, patch, port_update)`.
  fn client_version(&self) -> (c_int, c_int, c_int, c_int, c_int);
}
