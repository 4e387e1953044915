//! Java/Spring source rendering for each artifact kind.
//!
//! Output is assembled line by line from the typed descriptors, so the same
//! descriptor always renders to the same bytes.

use super::artifact::ArtifactKind;
use super::naming::to_path_segment;
use crate::schema::TableDescriptor;
use std::collections::BTreeSet;
use std::fmt::{self, Write};

/// Imports required by well-known Java target types
const TYPE_IMPORTS: &[(&str, &str)] = &[
    ("BigDecimal", "java.math.BigDecimal"),
    ("LocalDate", "java.time.LocalDate"),
    ("LocalDateTime", "java.time.LocalDateTime"),
    ("LocalTime", "java.time.LocalTime"),
    ("UUID", "java.util.UUID"),
];

/// Render the source text of one artifact
pub fn render(kind: ArtifactKind, table: &TableDescriptor, package_name: &str) -> Result<String, fmt::Error> {
    let mut output = String::new();

    match kind {
        ArtifactKind::Entity => write_entity(&mut output, table, package_name)?,
        ArtifactKind::Repository if table.is_view => write_view_repository(&mut output, table, package_name)?,
        ArtifactKind::Repository => write_table_repository(&mut output, table, package_name)?,
        ArtifactKind::Service => write_service(&mut output, table, package_name)?,
        ArtifactKind::Controller => write_controller(&mut output, table, package_name)?,
    }

    Ok(output)
}

fn type_imports(table: &TableDescriptor) -> BTreeSet<&'static str> {
    table
        .columns
        .iter()
        .filter_map(|c| {
            TYPE_IMPORTS
                .iter()
                .find(|(name, _)| *name == c.target_type)
                .map(|(_, import)| *import)
        })
        .collect()
}

fn write_entity(output: &mut String, table: &TableDescriptor, package_name: &str) -> fmt::Result {
    writeln!(output, "package {}.entity;\n", package_name)?;
    writeln!(output, "// Use javax.persistence for Spring Boot 2.x")?;
    writeln!(output, "import jakarta.persistence.*;")?;
    writeln!(output, "import lombok.Data;")?;
    for import in type_imports(table) {
        writeln!(output, "import {};", import)?;
    }
    writeln!(output)?;

    writeln!(output, "@Entity")?;
    writeln!(output, "@Data")?;
    writeln!(output, "@Table(name = \"{}\")", table.raw_name)?;
    writeln!(output, "public class {} {{", table.class_name)?;

    for column in &table.columns {
        writeln!(output)?;
        match column.length {
            Some(length) => writeln!(output, "    @Column(name = \"{}\", length = {})", column.name, length)?,
            None => writeln!(output, "    @Column(name = \"{}\")", column.name)?,
        }
        if column.is_primary_key {
            writeln!(output, "    @Id")?;
            if column.is_auto_generated {
                writeln!(output, "    @GeneratedValue(strategy = GenerationType.IDENTITY)")?;
            }
        }
        writeln!(output, "    private {} {};", column.target_type, column.display_name)?;
    }

    writeln!(output, "}}")
}

fn write_repository_header(output: &mut String, table: &TableDescriptor, package_name: &str) -> fmt::Result {
    writeln!(output, "package {}.repository;\n", package_name)?;
    writeln!(output, "import org.springframework.data.jpa.repository.JpaRepository;")?;
    if table.is_view {
        writeln!(output, "import org.springframework.data.jpa.repository.Query;")?;
        writeln!(output, "import org.springframework.data.domain.Page;")?;
        writeln!(output, "import org.springframework.data.domain.Pageable;")?;
        writeln!(output, "import org.springframework.data.repository.query.Param;")?;
        writeln!(output, "import org.springframework.lang.NonNull;")?;
    }
    writeln!(output, "import org.springframework.stereotype.Repository;")?;
    writeln!(output, "import {}.entity.{};\n", package_name, table.class_name)?;

    writeln!(output, "@Repository")?;
    writeln!(
        output,
        "public interface {}Repository extends JpaRepository<{}, {}> {{",
        table.class_name,
        table.class_name,
        table.primary_key_type()
    )
}

fn write_table_repository(output: &mut String, table: &TableDescriptor, package_name: &str) -> fmt::Result {
    write_repository_header(output, table, package_name)?;
    writeln!(output, "}}")
}

fn write_view_repository(output: &mut String, table: &TableDescriptor, package_name: &str) -> fmt::Result {
    let class_name = &table.class_name;

    write_repository_header(output, table, package_name)?;
    writeln!(output, "    @NonNull")?;
    writeln!(output, "    Page<{}> findAll(@NonNull Pageable pageable);\n", class_name)?;
    writeln!(
        output,
        "    @Query(\"SELECT p FROM {} p WHERE LOWER(p.keyword) LIKE LOWER(CONCAT('%',:keyword,'%'))\")",
        class_name
    )?;
    writeln!(
        output,
        "    Page<{}> searchByKeyword(@Param(\"keyword\") String keyword, Pageable pageable);",
        class_name
    )?;
    writeln!(output, "}}")
}

fn write_service(output: &mut String, table: &TableDescriptor, package_name: &str) -> fmt::Result {
    let class_name = &table.class_name;
    let id_type = table.primary_key_type();

    writeln!(output, "package {}.service;\n", package_name)?;
    writeln!(output, "import java.util.Optional;")?;
    writeln!(output, "import org.springframework.data.domain.Page;")?;
    writeln!(output, "import org.springframework.data.domain.Pageable;")?;
    writeln!(output, "import org.springframework.stereotype.Service;")?;
    writeln!(output, "import {}.entity.{};", package_name, class_name)?;
    writeln!(output, "import {}.repository.{}Repository;\n", package_name, class_name)?;

    writeln!(output, "@Service")?;
    writeln!(output, "public class {}Service {{\n", class_name)?;
    writeln!(output, "    private final {}Repository repository;\n", class_name)?;
    writeln!(output, "    public {}Service({}Repository repository) {{", class_name, class_name)?;
    writeln!(output, "        this.repository = repository;")?;
    writeln!(output, "    }}\n")?;

    writeln!(output, "    public Page<{}> findAll(Pageable pageable) {{", class_name)?;
    writeln!(output, "        return repository.findAll(pageable);")?;
    writeln!(output, "    }}\n")?;

    writeln!(output, "    public Optional<{}> findById({} id) {{", class_name, id_type)?;
    writeln!(output, "        return repository.findById(id);")?;
    writeln!(output, "    }}")?;

    if table.is_view {
        writeln!(output)?;
        writeln!(output, "    public Page<{}> search(String keyword, Pageable pageable) {{", class_name)?;
        writeln!(output, "        return repository.searchByKeyword(keyword, pageable);")?;
        writeln!(output, "    }}")?;
    } else {
        writeln!(output)?;
        writeln!(output, "    public {} create({} entity) {{", class_name, class_name)?;
        writeln!(output, "        return repository.save(entity);")?;
        writeln!(output, "    }}\n")?;

        writeln!(output, "    public {} update({} entity) {{", class_name, class_name)?;
        writeln!(output, "        return repository.save(entity);")?;
        writeln!(output, "    }}\n")?;

        writeln!(output, "    public void deleteById({} id) {{", id_type)?;
        writeln!(output, "        repository.deleteById(id);")?;
        writeln!(output, "    }}")?;
    }

    writeln!(output, "}}")
}

fn write_controller(output: &mut String, table: &TableDescriptor, package_name: &str) -> fmt::Result {
    let class_name = &table.class_name;

    writeln!(output, "package {}.controller;\n", package_name)?;
    writeln!(output, "import org.springframework.data.domain.Page;")?;
    writeln!(output, "import org.springframework.data.domain.Pageable;")?;
    writeln!(output, "import org.springframework.http.ResponseEntity;")?;
    writeln!(output, "import org.springframework.web.bind.annotation.*;")?;
    writeln!(output, "import {}.entity.{};", package_name, class_name)?;
    writeln!(output, "import {}.service.{}Service;\n", package_name, class_name)?;

    writeln!(output, "@RestController")?;
    writeln!(output, "@RequestMapping(\"/api/{}\")", to_path_segment(&table.raw_name))?;
    writeln!(output, "public class {}Controller {{\n", class_name)?;
    writeln!(output, "    private final {}Service service;\n", class_name)?;
    writeln!(output, "    public {}Controller({}Service service) {{", class_name, class_name)?;
    writeln!(output, "        this.service = service;")?;
    writeln!(output, "    }}\n")?;

    writeln!(output, "    @GetMapping")?;
    writeln!(output, "    public Page<{}> list(Pageable pageable) {{", class_name)?;
    writeln!(output, "        return service.findAll(pageable);")?;
    writeln!(output, "    }}\n")?;

    writeln!(output, "    @GetMapping(\"/{{id}}\")")?;
    writeln!(
        output,
        "    public ResponseEntity<{}> get(@PathVariable {} id) {{",
        class_name,
        table.primary_key_type()
    )?;
    writeln!(output, "        return service.findById(id)")?;
    writeln!(output, "                .map(ResponseEntity::ok)")?;
    writeln!(output, "                .orElse(ResponseEntity.notFound().build());")?;
    writeln!(output, "    }}")?;
    writeln!(output, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::type_map::TypeMap;
    use crate::schema::{AutoIncrementPolicy, CatalogColumn, ColumnDescriptor};

    fn describe(name: &str, is_view: bool, columns: Vec<CatalogColumn>, type_map: &TypeMap) -> TableDescriptor {
        let columns = columns
            .iter()
            .map(|c| ColumnDescriptor::from_catalog(c, type_map, AutoIncrementPolicy::TypeGuarded))
            .collect();
        TableDescriptor::new(name, is_view, columns)
    }

    fn user_account() -> TableDescriptor {
        describe(
            "user_account",
            false,
            vec![
                CatalogColumn::new("id", "int").primary_key().auto_increment(),
                CatalogColumn::new("full_name", "varchar(100)"),
            ],
            &TypeMap::default(),
        )
    }

    fn keyword_view() -> TableDescriptor {
        describe(
            "product_search",
            true,
            vec![CatalogColumn::new("id", "int"), CatalogColumn::new("keyword", "text")],
            &TypeMap::default(),
        )
    }

    #[test]
    fn test_entity_fields() {
        let source = render(ArtifactKind::Entity, &user_account(), "com.example.demo").unwrap();

        assert!(source.starts_with("package com.example.demo.entity;\n"));
        assert!(source.contains("@Table(name = \"user_account\")"));
        assert!(source.contains("public class UserAccount {"));
        assert!(source.contains(
            "    @Column(name = \"id\")\n    @Id\n    @GeneratedValue(strategy = GenerationType.IDENTITY)\n    private Integer id;\n"
        ));
        assert!(source.contains("    @Column(name = \"full_name\", length = 100)\n    private String fullName;\n"));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn test_entity_field_order_follows_catalog() {
        let source = render(ArtifactKind::Entity, &user_account(), "p").unwrap();
        let id = source.find("private Integer id;").unwrap();
        let name = source.find("private String fullName;").unwrap();
        assert!(id < name);
    }

    #[test]
    fn test_entity_imports_for_java_types() {
        let mut map = TypeMap::default();
        map.insert("DATETIME", "LocalDateTime");
        map.insert("DECIMAL", "BigDecimal");
        let table = describe(
            "invoice",
            false,
            vec![
                CatalogColumn::new("issued_at", "datetime"),
                CatalogColumn::new("total", "decimal(10,2)"),
                CatalogColumn::new("paid_at", "datetime"),
            ],
            &map,
        );

        let source = render(ArtifactKind::Entity, &table, "p").unwrap();
        assert!(source.contains("import java.math.BigDecimal;\nimport java.time.LocalDateTime;\n"));
        assert_eq!(source.matches("import java.time.LocalDateTime;").count(), 1);
        assert!(source.contains("private LocalDateTime issuedAt;"));

        let plain = render(ArtifactKind::Entity, &user_account(), "p").unwrap();
        assert!(!plain.contains("import java."));
    }

    #[test]
    fn test_repository_variants() {
        let table_repo = render(ArtifactKind::Repository, &user_account(), "com.acme").unwrap();
        assert!(table_repo.contains(
            "public interface UserAccountRepository extends JpaRepository<UserAccount, Integer> {"
        ));
        assert!(table_repo.contains("import com.acme.entity.UserAccount;"));
        assert!(!table_repo.contains("searchByKeyword"));

        let view_repo = render(ArtifactKind::Repository, &keyword_view(), "com.acme").unwrap();
        assert!(view_repo.contains("Page<ProductSearch> findAll(@NonNull Pageable pageable);"));
        assert!(view_repo.contains("@Query(\"SELECT p FROM ProductSearch p WHERE LOWER(p.keyword)"));
        assert!(view_repo.contains("searchByKeyword(@Param(\"keyword\") String keyword, Pageable pageable);"));
    }

    #[test]
    fn test_repository_uses_primary_key_type() {
        let table = describe(
            "audit_log",
            false,
            vec![CatalogColumn::new("id", "bigint").primary_key().auto_increment()],
            &TypeMap::default(),
        );
        let source = render(ArtifactKind::Repository, &table, "p").unwrap();
        assert!(source.contains("JpaRepository<AuditLog, Long>"));
    }

    #[test]
    fn test_service_omits_mutations_for_views() {
        let table_service = render(ArtifactKind::Service, &user_account(), "p").unwrap();
        assert!(table_service.contains("public UserAccount create(UserAccount entity) {"));
        assert!(table_service.contains("public UserAccount update(UserAccount entity) {"));
        assert!(table_service.contains("public void deleteById(Integer id) {"));
        assert!(!table_service.contains("search("));

        let view_service = render(ArtifactKind::Service, &keyword_view(), "p").unwrap();
        assert!(view_service.contains("public Page<ProductSearch> search(String keyword, Pageable pageable) {"));
        assert!(view_service.contains("findById"));
        assert!(!view_service.contains("repository.save"));
        assert!(!view_service.contains("deleteById"));
    }

    #[test]
    fn test_controller_does_not_branch_on_view() {
        let table_controller = render(ArtifactKind::Controller, &user_account(), "p").unwrap();
        assert!(table_controller.contains("@RequestMapping(\"/api/user-account\")"));
        assert!(table_controller.contains("@GetMapping(\"/{id}\")"));
        assert!(table_controller.contains("get(@PathVariable Integer id)"));

        let mut as_view = user_account();
        as_view.is_view = true;
        let view_controller = render(ArtifactKind::Controller, &as_view, "p").unwrap();
        assert_eq!(table_controller, view_controller);
    }

    #[test]
    fn test_controller_path_uses_raw_name() {
        let table = describe(
            "Sales_Order",
            false,
            vec![CatalogColumn::new("id", "int").primary_key()],
            &TypeMap::default(),
        );
        let source = render(ArtifactKind::Controller, &table, "p").unwrap();
        assert!(source.contains("@RequestMapping(\"/api/Sales-Order\")"));
        assert!(source.contains("public class SalesOrderController {"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let table = user_account();
        for kind in ArtifactKind::ALL {
            let first = render(kind, &table, "com.example").unwrap();
            let second = render(kind, &table.clone(), "com.example").unwrap();
            assert_eq!(first, second);
        }
    }
}
