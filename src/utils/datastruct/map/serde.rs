use std::{
    fmt,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::utils::datastruct::map::ChainedHashMap;

/// 普通のmapとしてシリアライズする
/// バケット構造は保存しない (デシリアライズ時にrehashされる)
impl<K, V, S> Serialize for ChainedHashMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

struct ChainedHashMapVisitor<K, V, S> {
    _marker: PhantomData<fn() -> ChainedHashMap<K, V, S>>,
}

impl<'de, K, V, S> Visitor<'de> for ChainedHashMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = ChainedHashMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = ChainedHashMap::new();
        // 重複keyは後勝ち (putの上書きと同じ)
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for ChainedHashMap<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ChainedHashMapVisitor {
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_json_object_roundtrip_preserves_lookup() {
        let mut m = ChainedHashMap::<String, i64>::new();
        m.put("a".to_string(), 10);
        m.put("b".to_string(), 20);
        m.put("c".to_string(), 30);

        let s = serde_json::to_string(&m).unwrap();
        assert!(s.starts_with('{'));
        let de: ChainedHashMap<String, i64> = serde_json::from_str(&s).unwrap();

        assert_eq!(de, m);
        assert_eq!(de.get("b"), Ok(&20));
    }

    #[test]
    fn serde_cbor_roundtrip_rehashes_into_grown_table() {
        let m: ChainedHashMap<u64, i64> = (0..100u64).map(|i| (i, (i as i64) * -7)).collect();

        let bytes = serde_cbor::to_vec(&m).unwrap();
        let de: ChainedHashMap<u64, i64> = serde_cbor::from_slice(&bytes).unwrap();

        assert_eq!(de.len(), 100);
        assert_eq!(de.table_size(), m.table_size());
        for (k, v) in m.iter() {
            assert_eq!(de.get(k), Ok(v));
        }
    }

    #[test]
    fn serde_duplicate_keys_keep_last_value() {
        let de: ChainedHashMap<String, i32> = serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
        assert_eq!(de.len(), 1);
        assert_eq!(de.get("a"), Ok(&2));
    }
}
