//! Image entity - Immagine di un prodotto, salvata come BYTEA

use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Image {
    pub id: Uuid,
    pub bytes: Vec<u8>,
}

impl Image {
    /// Nome del file proposto al client nel Content-Disposition
    pub fn download_name(&self) -> String {
        format!("image_{}.bin", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_name_embeds_the_id() {
        let id = Uuid::nil();
        let image = Image { id, bytes: vec![1, 2, 3] };
        assert_eq!(
            image.download_name(),
            "image_00000000-0000-0000-0000-000000000000.bin"
        );
    }
}
