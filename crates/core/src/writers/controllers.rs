//! Controller writer: one method per HTTP action, each delegating to the
//! shared `IRestApi` contract.

use super::contract::{CONFIG_NAME, CONTRACT_NAME};
use super::{GeneratedText, ImportSet, RenderContext, TypeMapper, finish, type_name};
use crate::error::Result;
use crate::graph::TypeNode;
use crate::metadata::{ActionDef, HttpMethod};
use crate::typescript::utils::sanitize_ts_identifier;
use crate::typescript::{
    TsExpr, TsMethod, TsModule, TsParam, TsStmt, TsTemplatePart, TsType, TsTypeDef, TypeDefKind,
};

const API_PARAM: &str = "restApi";
const CONFIG_PARAM: &str = "config";

pub fn write_controller(ctx: &RenderContext<'_>, node: &TypeNode) -> Result<GeneratedText> {
    let mapper = TypeMapper::new(ctx, node);
    let mut imports = ImportSet::new(&node.identity, ctx.graph);
    let controller = node.identity.name();

    let mut methods = Vec::with_capacity(node.actions.len());
    for action in &node.actions {
        imports.add(&action.returns);
        for param in &action.parameters {
            imports.add(&param.ty);
        }
        methods.push(action_method(&mapper, controller, action)?);
    }

    let module = TsModule {
        imports: vec![ctx.import(
            CONTRACT_NAME,
            vec![CONTRACT_NAME.to_string(), CONFIG_NAME.to_string()],
        )],
        types: vec![TsTypeDef {
            name: type_name(&node.identity),
            type_params: Vec::new(),
            export: ctx.export(),
            kind: TypeDefKind::Class { methods },
        }],
    };
    Ok(finish(ctx, node, module, imports.into_vec()))
}

/// An action parameter: its wire name and the identifier it is bound to.
#[derive(Debug)]
struct Argument {
    key: String,
    ident: String,
}

fn action_method(mapper: &TypeMapper<'_>, controller: &str, action: &ActionDef) -> Result<TsMethod> {
    let returns = mapper.map(&action.returns, &format!("{}() return", action.name))?;

    let mut params = vec![TsParam::new(API_PARAM, TsType::reference(CONTRACT_NAME))];
    let mut arguments = Vec::with_capacity(action.parameters.len());
    for param in &action.parameters {
        let member = format!("{}({})", action.name, param.name);
        let ident = sanitize_ts_identifier(&param.name);
        params.push(TsParam::new(ident.clone(), mapper.map(&param.ty, &member)?));
        arguments.push(Argument {
            key: param.name.clone(),
            ident,
        });
    }
    params.push(TsParam::optional(CONFIG_PARAM, TsType::reference(CONFIG_NAME)));

    let (url, bound) = route_expr(mapper, &route(controller, action), action, &arguments)?;
    let remaining: Vec<_> = arguments
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !bound.contains(index))
        .map(|(_, argument)| argument)
        .collect();

    let payload = match remaining.as_slice() {
        [single] if action.method.has_body() => TsExpr::ident(single.ident.clone()),
        _ => TsExpr::Object(
            remaining
                .into_iter()
                .map(|argument| (argument.key, TsExpr::Ident(argument.ident)))
                .collect(),
        ),
    };

    let call = TsExpr::Call {
        callee: Box::new(TsExpr::member(
            TsExpr::ident(API_PARAM),
            client_method(action.method),
        )),
        type_args: vec![returns.clone()],
        args: vec![url, payload, TsExpr::ident(CONFIG_PARAM)],
    };

    Ok(TsMethod {
        name: action.name.clone(),
        public: true,
        type_params: Vec::new(),
        params,
        return_type: Some(TsType::generic("Promise", vec![returns])),
        body: Some(vec![TsStmt::Return(call)]),
    })
}

/// URL expression for `path`, plus the indexes of the arguments bound into it.
///
/// `{name}` segments are filled from the argument of that name (matched
/// case-insensitively); a `:constraint`, a trailing `?` and a leading `*` are
/// ignored. A segment with no matching argument fails the action.
fn route_expr(
    mapper: &TypeMapper<'_>,
    path: &str,
    action: &ActionDef,
    arguments: &[Argument],
) -> Result<(TsExpr, Vec<usize>)> {
    let mut parts = Vec::new();
    let mut bound = Vec::new();
    let mut rest = path;

    while let Some((before, after)) = rest.split_once('{') {
        let Some((placeholder, tail)) = after.split_once('}') else {
            break;
        };
        let name = placeholder
            .split_once(':')
            .map_or(placeholder, |(name, _)| name)
            .trim_start_matches('*')
            .trim_end_matches('?');
        let Some(index) = arguments
            .iter()
            .position(|argument| argument.key.eq_ignore_ascii_case(name))
        else {
            return Err(mapper.fail(
                &format!("{}() route", action.name),
                format!("route segment `{{{placeholder}}}` has no matching parameter"),
            ));
        };

        if !before.is_empty() {
            parts.push(TsTemplatePart::Text(before.to_string()));
        }
        parts.push(TsTemplatePart::Expr(TsExpr::call(
            "encodeURIComponent",
            vec![TsExpr::call(
                "String",
                vec![TsExpr::ident(arguments[index].ident.clone())],
            )],
        )));
        bound.push(index);
        rest = tail;
    }

    if parts.is_empty() {
        return Ok((TsExpr::string(path), bound));
    }
    if !rest.is_empty() {
        parts.push(TsTemplatePart::Text(rest.to_string()));
    }
    Ok((TsExpr::Template(parts), bound))
}

/// Name of the `IRestApi` member serving `method`.
pub(super) fn client_method(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "Get",
        HttpMethod::Post => "Post",
        HttpMethod::Put => "Put",
        HttpMethod::Delete => "Delete",
    }
}

/// Explicit route, or `/{Controller}/{Action}` with the `Controller` suffix removed.
fn route(controller: &str, action: &ActionDef) -> String {
    match &action.route {
        Some(route) if route.starts_with('/') => route.clone(),
        Some(route) => format!("/{route}"),
        None => {
            let prefix = controller.strip_suffix("Controller").unwrap_or(controller);
            format!("/{prefix}/{}", action.name)
        }
    }
}
