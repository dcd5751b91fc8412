use crate::spotify::genres::available_genre_seeds;

pub fn list_genres() {
    for genre in available_genre_seeds() {
        println!("{genre}");
    }
}
