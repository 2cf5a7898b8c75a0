//! Fixed-shape repository/service/controller scaffolding.
//!
//! These templaters apply a constant, non-recursive pattern once per root
//! entity; they consume only naming-scheme identities and contain no graph
//! logic. The service's update path returns the `null` sentinel when the
//! identified record does not exist; translating that into a boundary-level
//! not-found response is the caller's responsibility.

use crate::generator::naming::{self, ArtifactKind};
use crate::schema::types::EntityDescriptor;

/// Spring Data repository interface over `(Entity, Long)`.
pub fn render_repository(entity: &EntityDescriptor, root_namespace: &str) -> String {
    let class_name = naming::class_name(&entity.name, ArtifactKind::Repository);
    let package = naming::package_name(root_namespace, ArtifactKind::Repository);
    let model_import = format!("{}.{}", entity.model_package(root_namespace), entity.name);
    let entity_name = &entity.name;

    format!(
        r#"package {package};

import org.springframework.data.jpa.repository.JpaRepository;
import org.springframework.data.repository.PagingAndSortingRepository;
import {model_import};

public interface {class_name}
        extends PagingAndSortingRepository<{entity_name}, Long>, JpaRepository<{entity_name}, Long> {{
}}
"#
    )
}

/// Transactional service exposing the five conventional operations.
pub fn render_service(entity: &EntityDescriptor, root_namespace: &str) -> String {
    let class_name = naming::class_name(&entity.name, ArtifactKind::Service);
    let package = naming::package_name(root_namespace, ArtifactKind::Service);
    let dto = naming::class_name(&entity.name, ArtifactKind::Dto);
    let dto_package = naming::package_name(root_namespace, ArtifactKind::Dto);
    let mapper = naming::class_name(&entity.name, ArtifactKind::Mapper);
    let mapper_package = naming::package_name(root_namespace, ArtifactKind::Mapper);
    let repository = naming::class_name(&entity.name, ArtifactKind::Repository);
    let repository_package = naming::package_name(root_namespace, ArtifactKind::Repository);
    let entity_name = &entity.name;

    format!(
        r#"package {package};

import {dto_package}.PaginationRequestDto;
import {dto_package}.{dto};
import {mapper_package}.{mapper};
import {repository_package}.{repository};
import lombok.RequiredArgsConstructor;
import lombok.extern.slf4j.Slf4j;
import org.springframework.data.domain.Page;
import org.springframework.stereotype.Service;

@Service
@RequiredArgsConstructor
@Slf4j
public class {class_name} {{

    private final {repository} repository;

    private final {mapper} mapper;

    public Page<{dto}> findAll(PaginationRequestDto pageRequest) {{
        log.debug("Executing findAll()");
        return repository.findAll(pageRequest.toPageRequest()).map(mapper::toDto);
    }}

    public {dto} findById(Long id) {{
        log.debug("Executing findById() with id: {{}}", id);
        return repository.findById(id).map(mapper::toDto).orElse(null);
    }}

    public {dto} save({dto} dto) {{
        log.debug("Executing save() with dto: {{}}", dto);
        dto = mapper.toDto(repository.save(mapper.toEntity(dto)));
        log.info("{entity_name} created: {{}}", dto);
        return dto;
    }}

    public {dto} update(Long id, {dto} dto) {{
        log.debug("Executing update() with id: {{}}", id);
        if (!repository.existsById(id)) {{
            log.warn("{entity_name} with id {{}} not found, skipping update", id);
            return null;
        }}
        dto.setId(id);
        return mapper.toDto(repository.save(mapper.toEntity(dto)));
    }}

    public void deleteById(Long id) {{
        log.debug("Executing deleteById() with id: {{}}", id);
        repository.deleteById(id);
        log.info("{entity_name} with id {{}} deleted", id);
    }}
}}
"#
    )
}

/// REST controller delegating the five conventional operations to the
/// service, mounted at `/api/{{entity-lowercase}}`.
pub fn render_controller(entity: &EntityDescriptor, root_namespace: &str) -> String {
    let class_name = naming::class_name(&entity.name, ArtifactKind::Controller);
    let package = naming::package_name(root_namespace, ArtifactKind::Controller);
    let dto = naming::class_name(&entity.name, ArtifactKind::Dto);
    let dto_package = naming::package_name(root_namespace, ArtifactKind::Dto);
    let service = naming::class_name(&entity.name, ArtifactKind::Service);
    let service_package = naming::package_name(root_namespace, ArtifactKind::Service);
    let route = entity.name.to_lowercase();

    format!(
        r#"package {package};

import {dto_package}.PaginationRequestDto;
import {dto_package}.{dto};
import {service_package}.{service};
import lombok.RequiredArgsConstructor;
import org.springframework.data.domain.Page;
import org.springframework.web.bind.annotation.DeleteMapping;
import org.springframework.web.bind.annotation.GetMapping;
import org.springframework.web.bind.annotation.PathVariable;
import org.springframework.web.bind.annotation.PostMapping;
import org.springframework.web.bind.annotation.PutMapping;
import org.springframework.web.bind.annotation.RequestBody;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RestController;

@RestController
@RequestMapping("/api/{route}")
@RequiredArgsConstructor
public class {class_name} {{

    private final {service} service;

    @GetMapping
    public Page<{dto}> getAll(PaginationRequestDto pageRequest) {{
        return service.findAll(pageRequest);
    }}

    @GetMapping("/{{id}}")
    public {dto} getById(@PathVariable("id") Long id) {{
        return service.findById(id);
    }}

    @PostMapping
    public {dto} create(@RequestBody {dto} dto) {{
        return service.save(dto);
    }}

    @PutMapping("/{{id}}")
    public {dto} update(@PathVariable("id") Long id, @RequestBody {dto} dto) {{
        return service.update(id, dto);
    }}

    @DeleteMapping("/{{id}}")
    public void delete(@PathVariable("id") Long id) {{
        service.deleteById(id);
    }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> EntityDescriptor {
        EntityDescriptor {
            name: "Order".to_string(),
            namespace: None,
            fields: vec![],
        }
    }

    #[test]
    fn test_render_repository() {
        let code = render_repository(&order(), "com.acme.shop");

        assert!(code.starts_with("package com.acme.shop.repository;\n"));
        assert!(code.contains("import com.acme.shop.model.Order;"));
        assert!(code.contains("public interface OrderRepository"));
        assert!(code.contains("PagingAndSortingRepository<Order, Long>"));
        assert!(code.contains("JpaRepository<Order, Long>"));
    }

    #[test]
    fn test_render_service_exposes_five_operations() {
        let code = render_service(&order(), "com.acme.shop");

        assert!(code.contains("public class OrderService {"));
        assert!(code.contains("public Page<OrderDto> findAll(PaginationRequestDto pageRequest) {"));
        assert!(code.contains("public OrderDto findById(Long id) {"));
        assert!(code.contains("public OrderDto save(OrderDto dto) {"));
        assert!(code.contains("public OrderDto update(Long id, OrderDto dto) {"));
        assert!(code.contains("public void deleteById(Long id) {"));
    }

    #[test]
    fn test_update_returns_not_found_sentinel() {
        let code = render_service(&order(), "com.acme.shop");

        assert!(code.contains("if (!repository.existsById(id)) {"));
        assert!(code.contains("return null;"));
        assert!(!code.contains("throw"));
    }

    #[test]
    fn test_render_controller_routes() {
        let code = render_controller(&order(), "com.acme.shop");

        assert!(code.contains("@RequestMapping(\"/api/order\")"));
        assert!(code.contains("public class OrderController {"));
        assert!(code.contains("@GetMapping(\"/{id}\")"));
        assert!(code.contains("@PostMapping"));
        assert!(code.contains("@PutMapping(\"/{id}\")"));
        assert!(code.contains("@DeleteMapping(\"/{id}\")"));
        assert!(code.contains("return service.update(id, dto);"));
    }

    #[test]
    fn test_custom_model_namespace_flows_into_imports() {
        let entity = EntityDescriptor {
            namespace: Some("com.acme.legacy.domain".to_string()),
            ..order()
        };
        let code = render_repository(&entity, "com.acme.shop");
        assert!(code.contains("import com.acme.legacy.domain.Order;"));
    }
}
