use crate::{
    data::{CacheValue, DataFormat, TimeDirection},
    error::Error,
    random, State,
};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

impl State {
    pub fn i_save_as(&self, value: &str, cache_key: &str) -> Result<(), Error> {
        if value.is_empty() {
            return Err(Error::InvalidArgument("pass any value to save".into()));
        }
        if cache_key.is_empty() {
            return Err(Error::InvalidArgument("cache key should not be empty".into()));
        }

        self.cache.save(cache_key, CacheValue::from(value))
    }

    pub fn i_save_from_the_last_response_json_node_as(
        &self,
        expression: &str,
        cache_key: &str,
    ) -> Result<(), Error> {
        self.i_save_from_the_last_response_node_as(DataFormat::Json, expression, cache_key)
    }

    /// The node is stored as JSON; a string node renders without quotes in templates.
    pub fn i_save_from_the_last_response_node_as(
        &self,
        format: DataFormat,
        expression: &str,
        cache_key: &str,
    ) -> Result<(), Error> {
        let node = self.last_response_node(format, expression)?;
        debug!(expression, cache_key, "saving node");

        self.cache.save(cache_key, CacheValue::Json(node))
    }

    pub fn i_generate_a_random_int_in_the_range_to_and_save_it_as(
        &self,
        from: i64,
        to: i64,
        cache_key: &str,
    ) -> Result<(), Error> {
        let value = random::int_in_range(from, to)?;

        self.cache.save(cache_key, CacheValue::Int(value))
    }

    pub fn i_generate_a_random_float_in_the_range_to_and_save_it_as(
        &self,
        from: i64,
        to: i64,
        cache_key: &str,
    ) -> Result<(), Error> {
        let value = random::float_in_range(from, to)?;

        self.cache.save(cache_key, CacheValue::Float(value))
    }

    /// Saves a string of `from` to `to` characters drawn from `charset`.
    pub fn i_generate_random_runes_in_the_range_to_and_save_it_as(
        &self,
        charset: &str,
        from: usize,
        to: usize,
        cache_key: &str,
    ) -> Result<(), Error> {
        let length = random::int_in_range(from as i64, to as i64)?;
        let value = random::string_from_charset(length as usize, charset)?;

        self.cache.save(cache_key, CacheValue::Text(value))
    }

    pub fn i_generate_a_random_sentence_in_the_range_from_to_words_and_save_it_as(
        &self,
        charset: &str,
        word_min_length: usize,
        word_max_length: usize,
        from: usize,
        to: usize,
        cache_key: &str,
    ) -> Result<(), Error> {
        let value = random::sentence(charset, word_min_length, word_max_length, from, to)?;

        self.cache.save(cache_key, CacheValue::Text(value))
    }

    pub fn i_get_time_and_travel_by_and_save_it_as(
        &self,
        time: DateTime<Utc>,
        direction: TimeDirection,
        duration: Duration,
        cache_key: &str,
    ) -> Result<(), Error> {
        let offset = chrono::Duration::from_std(duration)
            .map_err(|e| Error::InvalidArgument(format!("duration out of range: {}", e)))?;
        let travelled = match direction {
            TimeDirection::Forward => time.checked_add_signed(offset),
            TimeDirection::Backward => time.checked_sub_signed(offset),
        }
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "moving {} {:?} by {:?} leaves the supported time range",
                time, direction, duration
            ))
        })?;

        self.cache.save(cache_key, CacheValue::Time(travelled))
    }

    pub fn i_generate_current_time_and_travel_by_and_save_it_as(
        &self,
        direction: TimeDirection,
        duration: Duration,
        cache_key: &str,
    ) -> Result<(), Error> {
        self.i_get_time_and_travel_by_and_save_it_as(Utc::now(), direction, duration, cache_key)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        data::{CacheValue, DataFormat, TimeDirection},
        error::Error,
        random::CHARSET_LOWERCASE,
        steps::testing::{state_with_response, stub_state},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_save_literal() {
        let (state, _) = stub_state();

        state.i_save_as("abc", "key").unwrap();
        assert_eq!(state.cache().get_saved("key").unwrap(), CacheValue::from("abc"));
        assert!(matches!(state.i_save_as("", "key"), Err(Error::InvalidArgument(_))));
        assert!(matches!(state.i_save_as("abc", ""), Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_save_json_node_and_reuse_it() {
        let state = state_with_response(200, &[], r#"{"user": {"id": 12, "name": "ann"}}"#).await;

        state.i_save_from_the_last_response_json_node_as("user.id", "id").unwrap();
        state
            .i_save_from_the_last_response_json_node_as("$.user.name", "name")
            .unwrap();

        assert_eq!(state.cache().get_saved("id").unwrap(), CacheValue::Json(json!(12)));
        assert_eq!(
            state.replace_template("/users/{{id}}/{{name}}").unwrap(),
            "/users/12/ann"
        );
        assert!(matches!(
            state.i_save_from_the_last_response_json_node_as("user.email", "email"),
            Err(Error::PathResolution { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_yaml_node() {
        let state = state_with_response(200, &[], "user:\n  roles:\n    - admin\n").await;

        state
            .i_save_from_the_last_response_node_as(DataFormat::Yaml, "user.roles.0", "role")
            .unwrap();
        assert_eq!(
            state.cache().get_saved("role").unwrap(),
            CacheValue::Json(json!("admin"))
        );
        assert!(matches!(
            state.i_save_from_the_last_response_node_as(DataFormat::PlainText, "user", "role"),
            Err(Error::UnsupportedValue(_))
        ));
    }

    #[tokio::test]
    async fn test_save_xml_node() {
        let state = state_with_response(
            200,
            &[("Content-Type", "application/xml")],
            r#"<user id="12"><roles><role>admin</role><role>dev</role></roles></user>"#,
        )
        .await;

        state
            .i_save_from_the_last_response_node_as(DataFormat::Xml, "user.roles.role.1", "role")
            .unwrap();
        state
            .i_save_from_the_last_response_node_as(DataFormat::Xml, "user.@id", "id")
            .unwrap();

        assert_eq!(state.replace_template("/users/{{id}}/{{role}}").unwrap(), "/users/12/dev");
        assert!(matches!(
            state.i_save_from_the_last_response_node_as(DataFormat::Xml, "user.name", "name"),
            Err(Error::PathResolution { .. })
        ));
    }

    #[test]
    fn test_save_node_without_response() {
        let (state, _) = stub_state();

        assert!(matches!(
            state.i_save_from_the_last_response_json_node_as("a", "b"),
            Err(Error::NoResponse)
        ));
    }

    #[test]
    fn test_random_values_are_saved() {
        let (state, _) = stub_state();

        state
            .i_generate_a_random_int_in_the_range_to_and_save_it_as(1, 3, "int")
            .unwrap();
        state
            .i_generate_a_random_float_in_the_range_to_and_save_it_as(1, 3, "float")
            .unwrap();
        state
            .i_generate_random_runes_in_the_range_to_and_save_it_as(CHARSET_LOWERCASE, 4, 4, "runes")
            .unwrap();
        state
            .i_generate_a_random_sentence_in_the_range_from_to_words_and_save_it_as(
                CHARSET_LOWERCASE,
                3,
                3,
                2,
                2,
                "sentence",
            )
            .unwrap();

        match state.cache().get_saved("int").unwrap() {
            CacheValue::Int(value) => assert!((1..=3).contains(&value)),
            other => panic!("unexpected value: {:?}", other),
        }
        match state.cache().get_saved("float").unwrap() {
            CacheValue::Float(value) => assert!((1.0..=3.0).contains(&value)),
            other => panic!("unexpected value: {:?}", other),
        }
        assert_eq!(state.cache().get_saved("runes").unwrap().to_string().len(), 4);
        assert_eq!(state.cache().get_saved("sentence").unwrap().to_string().len(), 7);

        assert!(state
            .i_generate_a_random_int_in_the_range_to_and_save_it_as(3, 1, "int")
            .is_err());
    }

    #[test]
    fn test_time_travel() {
        let (state, _) = stub_state();
        let start = Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap();

        state
            .i_get_time_and_travel_by_and_save_it_as(
                start,
                TimeDirection::Forward,
                Duration::from_secs(3600),
                "later",
            )
            .unwrap();
        state
            .i_get_time_and_travel_by_and_save_it_as(
                start,
                TimeDirection::Backward,
                Duration::from_secs(86400),
                "earlier",
            )
            .unwrap();

        assert_eq!(
            state.cache().get_saved("later").unwrap().to_string(),
            "2022-01-01T13:00:00Z"
        );
        assert_eq!(
            state.cache().get_saved("earlier").unwrap().to_string(),
            "2021-12-31T12:00:00Z"
        );
    }

    #[test]
    fn test_current_time_travel() {
        let (state, _) = stub_state();
        let before = Utc::now();

        state
            .i_generate_current_time_and_travel_by_and_save_it_as(
                TimeDirection::Forward,
                Duration::from_secs(60),
                "soon",
            )
            .unwrap();

        match state.cache().get_saved("soon").unwrap() {
            CacheValue::Time(time) => assert!(time >= before + chrono::Duration::seconds(60)),
            other => panic!("unexpected value: {:?}", other),
        }
    }
}
