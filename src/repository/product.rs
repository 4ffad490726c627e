use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::unicode_lower,
    domain::{
        product::{NewProduct, Product, ProductSort, UpdateProduct},
        types::ProductId,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{
        DieselRepository, ProductListQuery, ProductReader, ProductWriter, errors::RepositoryResult,
    },
    schema::products,
};

/// Builds a `LIKE` pattern matching `search` literally anywhere in the value.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Base query shared by the page and the count so both see the same predicate.
fn filtered_products(pattern: Option<&str>) -> products::BoxedQuery<'_, Sqlite> {
    let mut query = products::table.into_boxed();
    // Both sides are lowercased so matching ignores case beyond ASCII.
    if let Some(pattern) = pattern {
        query = query.filter(unicode_lower(products::name).like(pattern).escape('\\'));
    }
    query
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn into_domain(rows: Vec<DbProduct>) -> RepositoryResult<Vec<Product>> {
    Ok(rows
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?)
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        let product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Product::try_from).transpose()?)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let mut conn = self.conn()?;

        let pattern = query
            .search
            .as_deref()
            .filter(|search| !search.is_empty())
            .map(|search| like_pattern(&search.to_lowercase()));

        let total: i64 = filtered_products(pattern.as_deref())
            .count()
            .get_result(&mut conn)?;

        let mut items = filtered_products(pattern.as_deref());
        items = match query.sort {
            ProductSort::Newest => items.order((products::created_at.desc(), products::id.desc())),
            ProductSort::PriceAsc => items.order((products::price_cents.asc(), products::id.asc())),
            ProductSort::PriceDesc => {
                items.order((products::price_cents.desc(), products::id.desc()))
            }
        };
        if let Some(pagination) = query.pagination {
            items = items
                .limit(to_i64(pagination.per_page))
                .offset(to_i64(pagination.offset()));
        }

        let items = into_domain(items.load::<DbProduct>(&mut conn)?)?;

        Ok((usize::try_from(total).unwrap_or_default(), items))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let insertable: DbNewProduct = new_product.into();

        let created = diesel::insert_into(products::table)
            .values(&insertable)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(&self, id: ProductId, updates: &UpdateProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let changes: DbUpdateProduct = updates.into();

        let updated = diesel::update(products::table.find(id.get()))
            .set(&changes)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.find(id.get()))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(deleted.try_into()?)
    }
}
