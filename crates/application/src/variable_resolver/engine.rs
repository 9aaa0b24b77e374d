//! Variable substitution engine
//!
//! Replaces `{{key}}` with environment values in a single left-to-right pass
//! and derives the `Authorization` header from the request's auth descriptor.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use courier_domain::environment::VariableMap;
use courier_domain::request::remove_header;
use courier_domain::{ApiRequest, AuthDetails, Environment};

use super::parser::{next_char_len, parse_placeholders, placeholder_at};

/// Replaces every `{{key}}` whose key exists in `variables`.
///
/// Unknown placeholders stay verbatim. Substituted values are not scanned
/// again, so a value containing `{{other}}` is inserted literally.
#[must_use]
pub fn substitute(input: &str, variables: &VariableMap) -> String {
    if variables.is_empty() || !input.contains("{{") {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if let Some((name, end)) = placeholder_at(input, i) {
            if let Some(value) = variables.get(&input[name]) {
                output.push_str(value);
                i = end;
                continue;
            }
        }
        let len = next_char_len(input, i);
        output.push_str(&input[i..i + len]);
        i += len;
    }
    output
}

/// Header value derived from an auth descriptor, if one applies.
///
/// Bearer needs a non-empty token; basic needs a username or a password.
#[must_use]
pub fn authorization_value(auth: &AuthDetails) -> Option<String> {
    match auth {
        AuthDetails::None => None,
        AuthDetails::Bearer { token } if !token.is_empty() => Some(format!("Bearer {token}")),
        AuthDetails::Basic { username, password }
            if !username.is_empty() || !password.is_empty() =>
        {
            let encoded = STANDARD.encode(format!("{username}:{password}"));
            Some(format!("Basic {encoded}"))
        }
        AuthDetails::Bearer { .. } | AuthDetails::Basic { .. } => None,
    }
}

/// Resolves a request against the active environment.
///
/// Variables are substituted into the URL, the body, every header value and
/// the auth fields. Any `Authorization` header is then dropped and derived
/// again from the substituted auth descriptor.
#[must_use]
pub fn resolve_request(request: &ApiRequest, environment: Option<&Environment>) -> ApiRequest {
    let mut resolved = request.clone();

    if let Some(env) = environment {
        let vars = &env.variables;
        resolved.url = substitute(&request.url, vars);
        resolved.body = substitute(&request.body, vars);
        for value in resolved.headers.values_mut() {
            *value = substitute(value, vars);
        }
        resolved.auth = match &request.auth {
            AuthDetails::None => AuthDetails::None,
            AuthDetails::Bearer { token } => AuthDetails::bearer(substitute(token, vars)),
            AuthDetails::Basic { username, password } => {
                AuthDetails::basic(substitute(username, vars), substitute(password, vars))
            }
        };
    }

    remove_header(&mut resolved.headers, "Authorization");
    if let Some(value) = authorization_value(&resolved.auth) {
        resolved.headers.insert("Authorization".to_string(), value);
    }

    resolved
}

/// Placeholder names still present in the URL, headers, body or auth of a
/// resolved request, without duplicates.
#[must_use]
pub fn unresolved_variables(request: &ApiRequest) -> Vec<String> {
    let mut fields: Vec<&str> = vec![request.url.as_str(), request.body.as_str()];
    fields.extend(request.headers.values().map(String::as_str));
    match &request.auth {
        AuthDetails::None => {}
        AuthDetails::Bearer { token } => fields.push(token),
        AuthDetails::Basic { username, password } => {
            fields.push(username);
            fields.push(password);
        }
    }

    let mut names: Vec<String> = Vec::new();
    for placeholder in fields.into_iter().flat_map(parse_placeholders) {
        if !names.contains(&placeholder.name) {
            names.push(placeholder.name);
        }
    }
    names
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::HttpMethod;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> VariableMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let mut env = Environment::new("p", "Local").unwrap();
        env.variables = vars(pairs);
        env
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let v = vars(&[("id", "7")]);
        assert_eq!(substitute("/a/{{id}}/b/{{id}}", &v), "/a/7/b/7");
    }

    #[test]
    fn test_unknown_left_verbatim() {
        let v = vars(&[("id", "7")]);
        assert_eq!(substitute("{{other}} {{id}}", &v), "{{other}} 7");
    }

    #[test]
    fn test_keys_are_exact() {
        let v = vars(&[("id", "7")]);
        assert_eq!(substitute("{{ id }}", &v), "{{ id }}");
        assert_eq!(substitute("{{ID}}", &v), "{{ID}}");
    }

    #[test]
    fn test_single_pass_no_recursion() {
        let v = vars(&[("a", "{{b}}"), ("b", "x")]);
        assert_eq!(substitute("{{a}}", &v), "{{b}}");
    }

    #[test]
    fn test_extra_brace_still_matches() {
        let v = vars(&[("a", "1")]);
        assert_eq!(substitute("{{{a}}", &v), "{1");
        assert_eq!(substitute("{{x{{a}}", &v), "{{x1");
    }

    #[test]
    fn test_keys_with_special_characters() {
        let v = vars(&[("a.b", "dot"), ("$ref", "dollar")]);
        assert_eq!(substitute("{{a.b}}-{{$ref}}-{{axb}}", &v), "dot-dollar-{{axb}}");
    }

    #[test]
    fn test_bearer_from_variable_replaces_manual_header() {
        let request = ApiRequest::new("f", "r")
            .with_header("authorization", "Basic stale")
            .with_auth(AuthDetails::bearer("{{tok}}"));
        let resolved = resolve_request(&request, Some(&env(&[("tok", "abc")])));

        let auth_headers: Vec<(&String, &String)> = resolved
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth_headers.len(), 1);
        assert_eq!(auth_headers[0].1, "Bearer abc");
    }

    #[test]
    fn test_basic_auth_is_base64() {
        let request = ApiRequest::new("f", "r").with_auth(AuthDetails::basic("{{user}}", "secret"));
        let resolved = resolve_request(&request, Some(&env(&[("user", "alice")])));
        assert_eq!(
            resolved.headers.get("Authorization").map(String::as_str),
            Some("Basic YWxpY2U6c2VjcmV0")
        );
    }

    #[test]
    fn test_auth_none_strips_manual_header() {
        let request = ApiRequest::new("f", "r").with_header("Authorization", "Bearer manual");
        let resolved = resolve_request(&request, None);
        assert!(resolved.headers.is_empty());
    }

    #[test]
    fn test_empty_credentials_add_nothing() {
        assert_eq!(authorization_value(&AuthDetails::bearer("")), None);
        assert_eq!(authorization_value(&AuthDetails::basic("", "")), None);
        assert_eq!(
            authorization_value(&AuthDetails::basic("", "pw")),
            Some("Basic OnB3".to_string())
        );
    }

    #[test]
    fn test_resolve_without_environment_keeps_placeholders() {
        let request = ApiRequest::new("f", "r").with_target(HttpMethod::Get, "{{host}}/ping");
        let resolved = resolve_request(&request, None);
        assert_eq!(resolved.url, "{{host}}/ping");
        assert_eq!(unresolved_variables(&resolved), vec!["host"]);
    }

    #[test]
    fn test_resolve_touches_url_body_headers() {
        let request = ApiRequest::new("f", "r")
            .with_target(HttpMethod::Post, "{{host}}/users")
            .with_header("X-Tenant", "{{tenant}}")
            .with_body(courier_domain::BodyType::Json, r#"{"tenant":"{{tenant}}"}"#);
        let resolved = resolve_request(
            &request,
            Some(&env(&[("host", "http://localhost"), ("tenant", "acme")])),
        );
        assert_eq!(resolved.url, "http://localhost/users");
        assert_eq!(resolved.body, r#"{"tenant":"acme"}"#);
        assert_eq!(resolved.headers.get("X-Tenant").map(String::as_str), Some("acme"));
        assert!(unresolved_variables(&resolved).is_empty());
    }

    #[test]
    fn test_resolve_is_pure() {
        let request = ApiRequest::new("f", "r").with_auth(AuthDetails::bearer("{{tok}}"));
        let _ = resolve_request(&request, Some(&env(&[("tok", "abc")])));
        assert_eq!(request.auth, AuthDetails::bearer("{{tok}}"));
    }
}
