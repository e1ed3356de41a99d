//! IdGenerator port - ID 生成の抽象化
//!
//! 一時 artifact のファイル名はこの ID から作ります。
//! 同時に開かれた複数のドキュメントが同じパスを使わないことが唯一の共有不変条件です。
//!
//! # 実装
//! - **UlidGenerator**: monotonic ULID（同一プロセス内で重複しない）

use std::sync::Mutex;
use std::time::SystemTime;

use ulid::{Generator, Ulid};

use crate::domain::ids::ArtifactId;
use crate::ports::Clock;

/// IdGenerator は一時 artifact 用の ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数の acquisition から同時に使える）
pub trait IdGenerator: Send + Sync {
    fn generate_artifact_id(&self) -> ArtifactId;
}

/// UlidGenerator は monotonic ULID ベースの ID 生成器
///
/// 同じミリ秒内でもランダム部分をインクリメントするので、
/// このインスタンスから出る ID は必ず異なります。
pub struct UlidGenerator<C> {
    clock: C,
    inner: Mutex<Generator>,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            inner: Mutex::new(Generator::new()),
        }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_artifact_id(&self) -> ArtifactId {
        let now = SystemTime::from(self.clock.now());
        // poisoned lock でも Generator の状態は壊れない
        let mut generator = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let ulid = generator.generate_from_datetime(now).unwrap_or_else(|_| {
            // 80-bit のランダム部分を使い切った場合のみ
            let timestamp_ms = self.clock.now().timestamp_millis() as u64;
            Ulid::from_parts(timestamp_ms, rand::random())
        });
        ArtifactId::from(ulid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let id1 = id_gen.generate_artifact_id();
        let id2 = id_gen.generate_artifact_id();
        let id3 = id_gen.generate_artifact_id();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn fixed_clock_ids_share_timestamp_but_stay_unique() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_artifact_id();
        let id2 = id_gen.generate_artifact_id();

        assert_ne!(id1, id2);
        assert!(id1 < id2); // monotonic

        assert_eq!(id1.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
        assert_eq!(id2.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let id_gen = Arc::new(UlidGenerator::new(SystemClock));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let g = Arc::clone(&id_gen);
                std::thread::spawn(move || {
                    (0..500).map(|_| g.generate_artifact_id()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }
}
