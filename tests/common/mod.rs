//! Shared request fixtures for integration tests

#![allow(dead_code)]

use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto,
};

pub fn field(name: &str, number: i32, ty: Type, type_name: Option<&str>) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        type_name: type_name.map(str::to_string),
        json_name: Some(name.to_string()),
        ..Default::default()
    }
}

/// `acme/common.proto`: a Money message and a Currency enum.
pub fn common_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("acme/common.proto".to_string()),
        package: Some("acme".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("Money".to_string()),
            field: vec![
                field("amount", 1, Type::Int64, None),
                field("currency", 2, Type::Enum, Some(".acme.Currency")),
            ],
            ..Default::default()
        }],
        enum_type: vec![EnumDescriptorProto {
            name: Some("Currency".to_string()),
            value: vec![EnumValueDescriptorProto {
                name: Some("EUR".to_string()),
                number: Some(0),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// `acme/shop/order.proto`: an Order referencing Money, plus a service.
pub fn order_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("acme/shop/order.proto".to_string()),
        package: Some("acme.shop".to_string()),
        syntax: Some("proto3".to_string()),
        dependency: vec!["acme/common.proto".to_string()],
        message_type: vec![DescriptorProto {
            name: Some("Order".to_string()),
            field: vec![
                field("id", 1, Type::String, None),
                field("total", 2, Type::Message, Some(".acme.Money")),
            ],
            ..Default::default()
        }],
        service: vec![ServiceDescriptorProto {
            name: Some("Orders".to_string()),
            method: vec![MethodDescriptorProto {
                name: Some("Get".to_string()),
                input_type: Some(".acme.shop.Order".to_string()),
                output_type: Some(".acme.shop.Order".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn shop_request(parameter: Option<&str>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec!["acme/shop/order.proto".to_string()],
        parameter: parameter.map(str::to_string),
        proto_file: vec![common_file(), order_file()],
        ..Default::default()
    }
}

/// Files named by `names`, each with no content.
pub fn bare_request(names: &[&str]) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: names.iter().map(|s| s.to_string()).collect(),
        proto_file: names
            .iter()
            .map(|name| FileDescriptorProto {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}
