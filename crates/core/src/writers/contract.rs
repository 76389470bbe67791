//! The shared REST client contract every controller delegates to.

use super::controllers::client_method;
use crate::config::ModuleType;
use crate::metadata::HttpMethod;
use crate::typescript::{
    EmitLines, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind,
};

/// Name of the contract interface and of the file declaring it.
pub const CONTRACT_NAME: &str = "IRestApi";
/// Per-request options accepted by every contract method.
pub const CONFIG_NAME: &str = "RequestConfig";

/// Unindented lines of the contract file.
pub fn contract_lines(module_type: ModuleType) -> Vec<String> {
    let export = module_type == ModuleType::Module;
    let string = || TsType::Primitive(TsPrimitive::String);

    let config = TsTypeDef {
        name: CONFIG_NAME.to_string(),
        type_params: Vec::new(),
        export,
        kind: TypeDefKind::Interface {
            extends: None,
            properties: vec![
                TsProp::optional("headers", TsType::string_record(string())),
                TsProp::optional("timeout", TsType::Primitive(TsPrimitive::Number)),
            ],
            methods: Vec::new(),
        },
    };

    let methods = HttpMethod::ALL
        .into_iter()
        .map(|method| {
            let payload = if method.has_body() { "data" } else { "params" };
            TsMethod {
                name: client_method(method).to_string(),
                public: false,
                type_params: vec!["T".to_string()],
                params: vec![
                    TsParam::new("url", string()),
                    TsParam::optional(payload, TsType::Primitive(TsPrimitive::Unknown)),
                    TsParam::optional("config", TsType::reference(CONFIG_NAME)),
                ],
                return_type: Some(TsType::generic("Promise", vec![TsType::reference("T")])),
                body: None,
            }
        })
        .collect();

    let api = TsTypeDef {
        name: CONTRACT_NAME.to_string(),
        type_params: Vec::new(),
        export,
        kind: TypeDefKind::Interface {
            extends: None,
            properties: Vec::new(),
            methods,
        },
    };

    TsModule {
        imports: Vec::new(),
        types: vec![config, api],
    }
    .emit_lines()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_module_contract() {
        assert_eq!(
            contract_lines(ModuleType::Module),
            [
                "export interface RequestConfig {",
                "headers?: Record<string, string>;",
                "timeout?: number;",
                "}",
                "",
                "export interface IRestApi {",
                "Delete<T>(url: string, params?: unknown, config?: RequestConfig): Promise<T>;",
                "Get<T>(url: string, params?: unknown, config?: RequestConfig): Promise<T>;",
                "Post<T>(url: string, data?: unknown, config?: RequestConfig): Promise<T>;",
                "Put<T>(url: string, data?: unknown, config?: RequestConfig): Promise<T>;",
                "}"
            ]
        );
    }

    #[test]
    fn test_global_contract_is_not_exported() {
        let lines = contract_lines(ModuleType::Global);
        assert_eq!(lines[0], "interface RequestConfig {");
        assert!(lines.iter().all(|line| !line.starts_with("export")));
    }
}
