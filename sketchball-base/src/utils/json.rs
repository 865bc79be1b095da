use anyhow::anyhow;
use anyhow::Result;
use std::collections::HashMap;
use tinyjson::InnerAsRef;
use tinyjson::JsonValue;

pub fn read_value<T>(data: &HashMap<String, JsonValue>, name: &str) -> Result<T>
where
    T: Clone + Default + InnerAsRef,
{
    let value = data.get(name).ok_or_else(|| anyhow!("Failed to read {}", name))?;
    if value.is_null() {
        return Ok(Default::default());
    }

    Ok(value.get::<T>().ok_or_else(|| anyhow!("Failed to parse {}", name))?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_read_by_name() {
        let json = r#"{ "endpoint": "localhost:9000", "tick": 16, "missing": null }"#.parse::<JsonValue>().unwrap();
        let data = json.get::<HashMap<_, _>>().unwrap();

        assert_eq!(read_value::<String>(data, "endpoint").unwrap(), "localhost:9000");
        assert_eq!(read_value::<f64>(data, "tick").unwrap(), 16.0);
        assert_eq!(read_value::<f64>(data, "missing").unwrap(), 0.0);
        assert!(read_value::<f64>(data, "absent").is_err());
        assert!(read_value::<f64>(data, "endpoint").is_err());
    }
}
