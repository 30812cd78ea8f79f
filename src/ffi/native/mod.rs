//! Модуль, содержащий код для связывания с C интерфейсом OCI клиентской библиотеки Oracle.

use std::os::raw::{c_int, c_uchar, c_uint, c_ushort, c_void};
use std::ptr;

mod bind;
mod conn;
mod hndl;
mod misc;
mod stmt;

use self::bind::*;
use self::conn::*;
use self::hndl::*;
use self::misc::*;
use self::stmt::*;

use super::{Oci, OCIBind, OCIDefine, OCIDescribe, OCIEnv, OCIError, OCIRowid, OCIServer, OCISession, OCIStmt, OCISvcCtx, OCIType};

/// Реализация нативного интерфейса, напрямую вызывающая функции клиентской библиотеки Oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeOci;

impl Oci for NativeOci {
  unsafe fn env_create(&self, envhpp: *mut *mut OCIEnv, mode: c_uint, charset: c_ushort, ncharset: c_ushort) -> c_int {
    OCIEnvNlsCreate(
      envhpp, mode,
      ptr::null_mut(),// Контекст для функций управления памятью
      None, None, None,// Функции управления памятью по умолчанию
      0, ptr::null_mut(),// Дополнительная память не требуется
      charset, ncharset
    )
  }

  unsafe fn handle_alloc(&self, parenth: *const c_void, hndlpp: *mut *mut c_void, htype: c_uint) -> c_int {
    OCIHandleAlloc(parenth, hndlpp, htype, 0, ptr::null_mut())
  }
  unsafe fn handle_free(&self, hndlp: *mut c_void, htype: c_uint) -> c_int {
    OCIHandleFree(hndlp, htype)
  }
  unsafe fn descriptor_alloc(&self, parenth: *const c_void, descpp: *mut *mut c_void, dtype: c_uint) -> c_int {
    OCIDescriptorAlloc(parenth, descpp, dtype, 0, ptr::null_mut())
  }
  unsafe fn descriptor_free(&self, descp: *mut c_void, dtype: c_uint) -> c_int {
    OCIDescriptorFree(descp, dtype)
  }
  unsafe fn array_descriptor_alloc(&self, parenth: *const c_void, descpp: *mut *mut c_void, dtype: c_uint, array_size: c_uint) -> c_int {
    OCIArrayDescriptorAlloc(parenth, descpp, dtype, array_size, 0, ptr::null_mut())
  }
  unsafe fn array_descriptor_free(&self, descpp: *mut *mut c_void, dtype: c_uint) -> c_int {
    OCIArrayDescriptorFree(descpp, dtype)
  }

  unsafe fn error_get(&self, hndlp: *mut c_void, recordno: c_uint, errcodep: *mut c_int, bufp: *mut c_uchar, bufsiz: c_uint, htype: c_uint) -> c_int {
    OCIErrorGet(hndlp, recordno, ptr::null_mut(), errcodep, bufp, bufsiz, htype)
  }

  unsafe fn server_attach(&self, srvhp: *mut OCIServer, errhp: *mut OCIError, dblink: *const c_uchar, dblink_len: c_int, mode: c_uint) -> c_int {
    OCIServerAttach(srvhp, errhp, dblink, dblink_len, mode)
  }
  unsafe fn server_detach(&self, srvhp: *mut OCIServer, errhp: *mut OCIError, mode: c_uint) -> c_int {
    OCIServerDetach(srvhp, errhp, mode)
  }
  unsafe fn session_begin(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, usrhp: *mut OCISession, credt: c_uint, mode: c_uint) -> c_int {
    OCISessionBegin(svchp, errhp, usrhp, credt, mode)
  }
  unsafe fn session_end(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, usrhp: *mut OCISession, mode: c_uint) -> c_int {
    OCISessionEnd(svchp, errhp, usrhp, mode)
  }
  unsafe fn trans_commit(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, flags: c_uint) -> c_int {
    OCITransCommit(svchp, errhp, flags)
  }
  unsafe fn trans_rollback(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError, flags: c_uint) -> c_int {
    OCITransRollback(svchp, errhp, flags)
  }

  unsafe fn stmt_prepare(&self, svchp: *mut OCISvcCtx, stmtp: *mut *mut OCIStmt, errhp: *mut OCIError,
                         stmt: *const c_uchar, stmt_len: c_uint,
                         key: *const c_uchar, key_len: c_uint,
                         language: c_uint, mode: c_uint) -> c_int {
    OCIStmtPrepare2(svchp, stmtp, errhp, stmt, stmt_len, key, key_len, language, mode)
  }
  unsafe fn stmt_release(&self, stmtp: *mut OCIStmt, errhp: *mut OCIError, key: *const c_uchar, key_len: c_uint, mode: c_uint) -> c_int {
    OCIStmtRelease(stmtp, errhp, key, key_len, mode)
  }
  unsafe fn stmt_execute(&self, svchp: *mut OCISvcCtx, stmtp: *mut OCIStmt, errhp: *mut OCIError, iters: c_uint, rowoff: c_uint, mode: c_uint) -> c_int {
    // Снимки не используются
    OCIStmtExecute(svchp, stmtp, errhp, iters, rowoff, ptr::null(), ptr::null_mut(), mode)
  }
  unsafe fn stmt_fetch(&self, stmtp: *mut OCIStmt, errhp: *mut OCIError, nrows: c_uint, orientation: c_ushort, fetch_offset: c_int, mode: c_uint) -> c_int {
    OCIStmtFetch2(stmtp, errhp, nrows, orientation, fetch_offset, mode)
  }

  unsafe fn bind_by_pos(&self, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, errhp: *mut OCIError,
                        position: c_uint,
                        valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                        indp: *mut c_void, alenp: *mut u32, rcodep: *mut c_ushort,
                        maxarr_len: c_uint, curelep: *mut c_uint, mode: c_uint) -> c_int {
    OCIBindByPos2(stmtp, bindpp, errhp, position, valuep, value_sz, dty, indp, alenp, rcodep, maxarr_len, curelep, mode)
  }
  unsafe fn bind_by_name(&self, stmtp: *mut OCIStmt, bindpp: *mut *mut OCIBind, errhp: *mut OCIError,
                         placeholder: *const c_uchar, placeh_len: c_int,
                         valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                         indp: *mut c_void, alenp: *mut u32, rcodep: *mut c_ushort,
                         maxarr_len: c_uint, curelep: *mut c_uint, mode: c_uint) -> c_int {
    OCIBindByName2(stmtp, bindpp, errhp, placeholder, placeh_len, valuep, value_sz, dty, indp, alenp, rcodep, maxarr_len, curelep, mode)
  }
  unsafe fn bind_object(&self, bindp: *mut OCIBind, errhp: *mut OCIError, tdo: *const OCIType,
                        pgvpp: *mut *mut c_void, pvszsp: *mut c_uint,
                        indpp: *mut *mut c_void, indszp: *mut c_uint) -> c_int {
    OCIBindObject(bindp, errhp, tdo, pgvpp, pvszsp, indpp, indszp)
  }
  unsafe fn define_by_pos(&self, stmtp: *mut OCIStmt, defnpp: *mut *mut OCIDefine, errhp: *mut OCIError,
                          position: c_uint,
                          valuep: *mut c_void, value_sz: i64, dty: c_ushort,
                          indp: *mut c_void, rlenp: *mut u32, rcodep: *mut c_ushort,
                          mode: c_uint) -> c_int {
    OCIDefineByPos2(stmtp, defnpp, errhp, position, valuep, value_sz, dty, indp, rlenp, rcodep, mode)
  }
  unsafe fn define_object(&self, defnp: *mut OCIDefine, errhp: *mut OCIError, tdo: *const OCIType,
                          pgvpp: *mut *mut c_void, pvszsp: *mut c_uint,
                          indpp: *mut *mut c_void, indszp: *mut c_uint) -> c_int {
    OCIDefineObject(defnp, errhp, tdo, pgvpp, pvszsp, indpp, indszp)
  }

  unsafe fn param_get(&self, hndlp: *const c_void, htype: c_uint, errhp: *mut OCIError, parmdpp: *mut *mut c_void, pos: c_uint) -> c_int {
    OCIParamGet(hndlp, htype, errhp, parmdpp, pos)
  }
  unsafe fn attr_get(&self, trgthndlp: *const c_void, trghndltyp: c_uint,
                     attributep: *mut c_void, sizep: *mut c_uint,
                     attrtype: c_uint, errhp: *mut OCIError) -> c_int {
    OCIAttrGet(trgthndlp, trghndltyp, attributep, sizep, attrtype, errhp)
  }
  unsafe fn attr_set(&self, trgthndlp: *mut c_void, trghndltyp: c_uint,
                     attributep: *mut c_void, size: c_uint,
                     attrtype: c_uint, errhp: *mut OCIError) -> c_int {
    OCIAttrSet(trgthndlp, trghndltyp, attributep, size, attrtype, errhp)
  }
  unsafe fn describe_any(&self, svchp: *mut OCISvcCtx, errhp: *mut OCIError,
                         objptr: *mut c_void, objnm_len: c_uint, objptr_typ: c_uchar,
                         info_level: c_uchar, objtyp: c_uchar, dschp: *mut OCIDescribe) -> c_int {
    OCIDescribeAny(svchp, errhp, objptr, objnm_len, objptr_typ, info_level, objtyp, dschp)
  }
  unsafe fn type_by_name(&self, envhp: *mut OCIEnv, errhp: *mut OCIError, svchp: *const OCISvcCtx,
                         schema_name: *const c_uchar, s_length: c_uint,
                         type_name: *const c_uchar, t_length: c_uint,
                         pin_duration: c_ushort, get_option: c_uint,
                         tdo: *mut *mut OCIType) -> c_int {
    // Версии типов не поддерживаются сервером, всегда берется последняя
    OCITypeByName(envhp, errhp, svchp, schema_name, s_length, type_name, t_length, ptr::null(), 0, pin_duration, get_option, tdo)
  }
  unsafe fn rowid_to_char(&self, rowid: *mut OCIRowid, outbfp: *mut c_uchar, outbflp: *mut c_ushort, errhp: *mut OCIError) -> c_int {
    OCIRowidToChar(rowid, outbfp, outbflp, errhp)
  }
  unsafe fn server_release(&self, hndlp: *mut c_void, errhp: *mut OCIError, bufp: *mut c_uchar, bufsz: c_uint, hndltype: c_uchar, version: *mut c_uint) -> c_int {
    OCIServerRelease(hndlp, errhp, bufp, bufsz, hndltype, version)
  }
  fn client_version(&self) -> (c_int, c_int, c_int, c_int, c_int) {
    let mut ver = (0, 0, 0, 0, 0);
    unsafe {
      OCIClientVersion(&mut ver.0, &mut ver.1, &mut ver.2, &mut ver.3, &mut ver.4);
    }
    ver
  }
}
