//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! 一時ファイル名に使う ID は ULID (Universally Unique Lexicographically Sortable Identifier) です。
//! `Id<T>` は Phantom type パターンで ID の種類を型で区別します。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: timestamp が先頭にあるため、生成順序でソートできる
//! - **調整不要**: 複数の acquisition が同時に生成しても衝突しない（monotonic generator 使用時）
//! - **ファイル名に安全**: Crockford Base32 の 26 文字

use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックスを提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しません。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// 一時 artifact のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {}

impl IdMarker for Artifact {
    fn prefix() -> &'static str {
        "onnxsim_"
    }
}

/// Identifier of one temporary simplification output (one per acquisition).
pub type ArtifactId = Id<Artifact>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_id_displays_with_prefix() {
        let ulid = Ulid::new();
        let id = ArtifactId::from_ulid(ulid);

        assert_eq!(id.as_ulid(), ulid);
        assert_eq!(id.to_string(), format!("onnxsim_{ulid}"));
    }

    #[test]
    fn artifact_ids_are_sortable() {
        let id1 = ArtifactId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2)); // 時刻が進むのを待つ
        let id2 = ArtifactId::from_ulid(Ulid::new());

        assert!(id1 < id2);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<ArtifactId>(), size_of::<Ulid>());
    }
}
