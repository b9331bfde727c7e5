#[cfg(test)]
mod stub_server;

#[cfg(test)]
mod tests {
    use crate::stub_server;
    use apisteps::{api_scenario, ApiConfiguration, DataFormat, Error, State};
    use std::time::Duration;

    fn configure(config: &mut ApiConfiguration) {
        config.set_json_schema_dir(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../apisteps/tests/schemas"
        ));
    }

    async fn serve(state: &mut State) -> Result<(), Error> {
        let addr = stub_server::start().await;
        state.i_save_as(&format!("http://{}", addr), "base_url")
    }

    #[api_scenario(configure)]
    async fn fetches_user(state: &mut State) -> Result<(), Error> {
        serve(state).await?;

        state.i_prepare_new_request_to_and_save_it_as("GET", "{{base_url}}/users/1", "user")?;
        state.i_set_following_headers_for_prepared_request("user", r#"{"Accept": "application/json"}"#)?;
        state.i_send_request("user").await?;

        state.the_response_status_code_should_be(200)?;
        state.the_response_body_should_have_format(DataFormat::Json)?;
        state.the_json_response_should_have_nodes("id, name, $.roles[1]")?;
        state.the_json_node_should_be("id", "int")?;
        state.the_json_node_should_not_be("score", "int")?;
        state.the_json_node_should_be_slice_of_length("roles", 2)?;
        state.the_json_node_should_be_of_value("roles.#", "int", "2")?;
        state.the_json_node_should_be_of_value("$.name", "string", "ann")?;
        state.the_response_should_have_header("X-Test")?;
        state.the_response_should_have_header_of_value("X-Test", "abc")?;
        state.i_validate_last_response_body_with_schema_reference("user.json")?;
        state.time_between_last_http_request_response_should_be_less_than_or_equal_to(
            Duration::from_secs(5),
        )
    }

    #[api_scenario(configure)]
    async fn creates_user_from_saved_values(state: &mut State) -> Result<(), Error> {
        serve(state).await?;
        state.i_save_as("bob", "name")?;
        state.i_generate_a_random_int_in_the_range_to_and_save_it_as(18, 99, "age")?;

        state.i_prepare_new_request_to_and_save_it_as("POST", "{{base_url}}/users", "create")?;
        state.i_set_following_body_for_prepared_request("create", r#"{"name": "{{name}}", "age": {{age}}}"#)?;
        state.i_send_request("create").await?;
        state.the_response_status_code_should_be(415)?;

        state.i_set_following_headers_for_prepared_request(
            "create",
            r#"{"Content-Type": "application/json"}"#,
        )?;
        state.i_send_request("create").await?;
        state.the_response_status_code_should_be(201)?;
        state.the_json_node_should_be_of_value("name", "string", "{{name}}")?;
        state.the_json_node_should_be_of_value("age", "int", "{{age}}")?;

        state.i_save_from_the_last_response_json_node_as("name", "saved_name")?;
        state.i_send_request_to_with_body_and_headers(
            "POST",
            "{{base_url}}/users",
            r#"{"body": {"name": "{{saved_name}}"}, "headers": {"Content-Type": "application/json"}}"#,
        )
        .await?;
        state.the_response_status_code_should_be(201)?;
        state.i_validate_last_response_body_with_schema_string(
            r#"{"type": "object", "required": ["name"], "properties": {"name": {"const": "bob"}}}"#,
        )
    }

    #[api_scenario(configure)]
    async fn reads_xml_user(state: &mut State) -> Result<(), Error> {
        serve(state).await?;

        state.i_prepare_new_request_to_and_save_it_as("GET", "{{base_url}}/users/1.xml", "user")?;
        state.i_send_request("user").await?;

        state.the_response_status_code_should_be(200)?;
        state.the_response_body_should_have_format(DataFormat::Xml)?;
        state.the_response_should_have_header_of_value("Content-Type", "application/xml")?;
        state.i_save_from_the_last_response_node_as(DataFormat::Xml, "user.@id", "id")?;
        state.i_save_from_the_last_response_node_as(DataFormat::Xml, "user.roles.role.#", "roles")?;

        assert_eq!(state.cache().get_saved("id")?.to_string(), "1");
        assert_eq!(state.cache().get_saved("roles")?.to_string(), "2");

        Ok(())
    }

    #[api_scenario(configure)]
    async fn reports_missing_resource(state: &mut State) -> Result<(), Error> {
        serve(state).await?;

        state.i_prepare_new_request_to_and_save_it_as("GET", "{{base_url}}/users/404", "missing")?;
        state.i_send_request("missing").await?;

        state.the_response_status_code_should_be(404)?;
        assert!(matches!(
            state.the_response_status_code_should_be(200),
            Err(Error::AssertionFailed(_))
        ));
        assert!(state.the_response_should_have_header("X-Test").is_err());

        Ok(())
    }

    #[api_scenario(configure)]
    async fn measures_slow_response(state: &mut State) -> Result<(), Error> {
        serve(state).await?;

        state.i_prepare_new_request_to_and_save_it_as("GET", "{{base_url}}/slow", "slow")?;
        state.i_send_request("slow").await?;

        state.the_response_body_should_have_format(DataFormat::PlainText)?;
        state.time_between_last_http_request_response_should_be_less_than_or_equal_to(
            Duration::from_secs(5),
        )?;
        assert!(matches!(
            state.time_between_last_http_request_response_should_be_less_than_or_equal_to(
                Duration::from_millis(10)
            ),
            Err(Error::AssertionFailed(_))
        ));

        Ok(())
    }

    #[api_scenario(configure)]
    async fn fails_on_unreachable_server(state: &mut State) -> Result<(), Error> {
        state.i_prepare_new_request_to_and_save_it_as("GET", "http://127.0.0.1:1/", "request")?;

        assert!(matches!(
            state.i_send_request("request").await,
            Err(Error::Transport(_))
        ));
        assert!(matches!(
            state.the_response_status_code_should_be(200),
            Err(Error::NoResponse)
        ));

        Ok(())
    }

    fn configure_invalid_user_agent(config: &mut ApiConfiguration) {
        config.set_user_agent("bad\nagent");
    }

    #[api_scenario(configure_invalid_user_agent)]
    #[should_panic(expected = "could not build HTTP client")]
    async fn rejects_invalid_user_agent(_state: &mut State) {}

    #[api_scenario(configure)]
    #[should_panic(expected = "expected status code 500")]
    async fn panics_are_raised_again(state: &mut State) {
        serve(state).await.unwrap();
        state
            .i_prepare_new_request_to_and_save_it_as("GET", "{{base_url}}/users/1", "user")
            .unwrap();
        state.i_send_request("user").await.unwrap();

        state.the_response_status_code_should_be(500).unwrap();
    }
}
