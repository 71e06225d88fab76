//! # Spotify Module
//!
//! Calls the two Spotify Web API endpoints the dashboard shows and projects
//! their responses into flat views.
//!
//! ## API Coverage
//!
//! - `GET /me/player/currently-playing` - the track playing right now
//! - `GET /playlists/{playlist_id}` - the configured running playlist
//!
//! Both calls go through [`TokenSession::authorized_request`], so an expired
//! access token is refreshed once and the call retried transparently.

use reqwest::{Method, StatusCode};

use crate::{
    error::Result,
    management::TokenSession,
    types::{
        CurrentTrack, CurrentlyPlayingResponse, NowPlayingView, PlaylistTrackView, PlaylistView,
        SpotifyArtist, SpotifyPlaylist,
    },
};

/// Number of playlist tracks shown on the dashboard.
pub const PLAYLIST_PREVIEW_LEN: usize = 5;

/// Fetches what the user is currently listening to.
///
/// Spotify answers 204 No Content when nothing is playing, which maps to
/// `{ "isPlaying": false }`.
pub async fn now_playing(session: &TokenSession) -> Result<NowPlayingView> {
    let url = format!(
        "{uri}/me/player/currently-playing",
        uri = session.settings().api_url
    );

    let response = session.authorized_request(Method::GET, &url, &[]).await?;
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(NowPlayingView::idle());
    }

    let body = response.json::<CurrentlyPlayingResponse>().await?;
    Ok(now_playing_view(body))
}

/// Fetches the running playlist and keeps its first tracks.
pub async fn running_playlist(session: &TokenSession, playlist_id: &str) -> Result<PlaylistView> {
    let url = format!(
        "{uri}/playlists/{id}",
        uri = session.settings().api_url,
        id = playlist_id
    );

    let response = session.authorized_request(Method::GET, &url, &[]).await?;
    let body = response.json::<SpotifyPlaylist>().await?;
    Ok(playlist_view(body))
}

/// Projects a currently-playing response.
///
/// A response without an item (an ad or an unavailable track) is treated as
/// nothing playing.
pub fn now_playing_view(raw: CurrentlyPlayingResponse) -> NowPlayingView {
    let Some(track) = raw.item else {
        return NowPlayingView::idle();
    };

    let (album, album_art) = match track.album {
        Some(album) => (album.name, album.images.into_iter().next().map(|i| i.url)),
        None => (String::new(), None),
    };

    NowPlayingView::Playing {
        current_track: CurrentTrack {
            name: track.name,
            artist: join_artists(&track.artists),
            album,
            album_art,
            is_playing: raw.is_playing,
        },
    }
}

/// Projects a playlist to its name and first [`PLAYLIST_PREVIEW_LEN`] tracks.
///
/// Items whose track is gone (deleted or local files) are skipped before
/// counting.
pub fn playlist_view(raw: SpotifyPlaylist) -> PlaylistView {
    let tracks = raw
        .tracks
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .take(PLAYLIST_PREVIEW_LEN)
        .map(|track| PlaylistTrackView {
            artist: join_artists(&track.artists),
            name: track.name,
        })
        .collect();

    PlaylistView {
        name: raw.name,
        tracks,
    }
}

fn join_artists(artists: &[SpotifyArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
